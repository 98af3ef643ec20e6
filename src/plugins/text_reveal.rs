//! TextReveal plugin - runs the reveal engine for every `DialogueText` entity.
//!
//! Commands are applied first, then running reveals are stepped, then the glyph spans
//! and their alpha are brought up to date, all within the same frame.

use bevy::prelude::*;

use crate::components::dialogue_text::{glyph_color, DialogueText, SurfaceSpace};
use crate::events::{DialogueCommand, RevealFinishedEvent};
use crate::resources::cli::CliArgs;
use crate::resources::reveal_settings::RevealSettings;
use crate::systems::text_reveal::{
    apply_dialogue_commands, apply_glyph_alpha, drive_text_reveal, sync_glyph_spans,
};

pub struct TextRevealPlugin;

impl Plugin for TextRevealPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RevealSettings>()
            .add_event::<DialogueCommand>()
            .add_event::<RevealFinishedEvent>()
            .add_systems(
                PreStartup,
                load_reveal_settings.run_if(resource_exists::<CliArgs>),
            )
            .add_systems(
                Update,
                (
                    apply_dialogue_commands,
                    drive_text_reveal,
                    sync_glyph_spans,
                    apply_glyph_alpha,
                )
                    .chain(),
            );
    }
}

/// Loads settings from disk (or the `--settings` path) and applies CLI overrides.
fn load_reveal_settings(cli: Res<CliArgs>, mut settings: ResMut<RevealSettings>) {
    let mut loaded = RevealSettings::load_from_file(cli.settings_path.as_deref());
    loaded.apply_cli(&cli);
    info!(
        "Reveal settings: method={} speed={} chars/cycle={}",
        loaded.build_method, loaded.speed, loaded.characters_per_cycle
    );
    *settings = loaded;
}

/// Spawns a dialogue text root backed by either a UI text node or a world-space
/// `Text2d`. Glyph spans are attached once the first text is built.
pub fn spawn_dialogue_text(
    commands: &mut Commands,
    settings: &RevealSettings,
    space: SurfaceSpace,
    font: TextFont,
    placement: Transform,
) -> Entity {
    let dialogue = DialogueText::from_settings(settings, space);
    let color = TextColor(glyph_color(settings.text_color, 255));
    let font = TextFont {
        font_size: settings.font_size,
        ..font
    };

    let entity = match space {
        SurfaceSpace::Screen => commands
            .spawn((
                Name::new("Dialogue Text (screen)"),
                dialogue,
                Text::default(),
                font,
                color,
                TextLayout::new_with_justify(JustifyText::Left),
            ))
            .id(),
        SurfaceSpace::World => commands
            .spawn((
                Name::new("Dialogue Text (world)"),
                dialogue,
                Text2d::default(),
                font,
                color,
                TextLayout::new_with_justify(JustifyText::Center),
                placement,
            ))
            .id(),
    };

    debug!("Spawned {:?} dialogue surface {:?}", space, entity);
    entity
}
