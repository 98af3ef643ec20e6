use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use text_architect::plugins::debug_ui::DebugUiPlugin;
use text_architect::plugins::demo::DemoPlugin;
use text_architect::plugins::input::InputPlugin;
use text_architect::plugins::text_reveal::TextRevealPlugin;
use text_architect::resources::CliArgs;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Text Architect".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .insert_resource(CliArgs::parse())
        .add_plugins(TextRevealPlugin)
        .add_plugins(InputPlugin)
        .add_plugins(DebugUiPlugin)
        .add_plugins(DemoPlugin)
        .run();
}
