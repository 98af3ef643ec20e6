use bevy::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy_egui::{egui, EguiContexts};

use crate::components::dialogue_text::DialogueText;
use crate::events::{DialogueCommand, DialogueCommandKind};
use crate::features::text_reveal::{BuildMethod, RevealSurface};
use crate::resources::reveal_settings::RevealSettings;

pub struct DebugUiPlugin;

impl Plugin for DebugUiPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
            app.add_plugins(FrameTimeDiagnosticsPlugin::default());
        }

        app.add_systems(Update, debug_panel);
    }
}

fn debug_panel(
    mut contexts: EguiContexts,
    dialogues: Query<(Entity, &DialogueText, Option<&Name>)>,
    mut settings: ResMut<RevealSettings>,
    mut dialogue_commands: EventWriter<DialogueCommand>,
    diagnostics: Res<DiagnosticsStore>,
) {
    egui::Window::new("Reveal Debug").show(contexts.ctx_mut(), |ui| {
        // Fade speed is per frame, so the frame rate matters when tuning.
        if let Some(fps) = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|diag| diag.smoothed())
        {
            ui.label(format!("FPS: {:.1}", fps));
        }

        ui.separator();
        ui.heading("Defaults");

        ui.horizontal(|ui| {
            for method in BuildMethod::all() {
                if ui.radio(settings.build_method == *method, method.label()).clicked() {
                    settings.build_method = *method;
                }
            }
        });
        ui.add(egui::Slider::new(&mut settings.speed, -0.9..=4.0).text("Speed"));
        ui.label(format!(
            "Effective speed {:.2}, {} chars/tick, interval {:.4}s",
            settings.speed_model().effective_speed(),
            settings.speed_model().characters_per_tick(),
            settings.speed_model().tick_interval()
        ));

        if ui.button("Save settings").clicked() {
            if let Err(e) = settings.save_to_file() {
                error!("{}", e);
            }
        }

        for (entity, dialogue, name) in &dialogues {
            let architect = &dialogue.architect;
            let surface = architect.surface();
            let title = name.map_or_else(|| format!("{:?}", entity), |name| name.to_string());

            ui.separator();
            ui.collapsing(title, |ui| {
                ui.label(format!(
                    "{} @ speed {:.2}",
                    architect.build_method(),
                    architect.speed()
                ));
                let process = match architect.active_handle() {
                    Some(handle) => format!("reveal #{}", handle.id()),
                    None => "idle".to_string(),
                };
                ui.label(format!(
                    "{} | revealed {}/{}",
                    process,
                    surface.revealed_count(),
                    surface.character_count()
                ));
                ui.label(format!(
                    "pre: {} chars, target: {} chars",
                    architect.pre_text().chars().count(),
                    architect.target_text().chars().count()
                ));

                let mut hurry_up = architect.hurry_up();
                let toggled = ui.checkbox(&mut hurry_up, "Hurry up").changed();
                let current = architect.hurry_up();
                if let Some(command) = hurry_toggle(entity, current, hurry_up, toggled) {
                    dialogue_commands.send(command);
                }

                ui.horizontal(|ui| {
                    let mut send =
                        |kind| dialogue_commands.send(DialogueCommand::new(entity, kind));
                    if ui.button("Apply defaults").clicked() {
                        send(DialogueCommandKind::SetMethod(settings.build_method));
                        send(DialogueCommandKind::SetSpeed(settings.speed));
                    }
                    if ui.button("Replay").clicked() {
                        send(DialogueCommandKind::Build(architect.full_target_text().to_string()));
                    }
                    if ui.button("Stop").clicked() {
                        send(DialogueCommandKind::Stop);
                    }
                    if ui.button("Force complete").clicked() {
                        send(DialogueCommandKind::ForceComplete);
                    }
                });
            });
        }
    });
}

/// Command for a hurry-up checkbox edit, if the box was toggled to a new state.
fn hurry_toggle(
    entity: Entity,
    current: bool,
    checked: bool,
    toggled: bool,
) -> Option<DialogueCommand> {
    (toggled && checked != current)
        .then(|| DialogueCommand::new(entity, DialogueCommandKind::HurryUp(checked)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hurry_toggle_sends_new_state() {
        let entity = Entity::from_raw(7);
        let command = hurry_toggle(entity, false, true, true).expect("command");
        assert_eq!(command.entity, entity);
        assert_eq!(command.kind, DialogueCommandKind::HurryUp(true));

        let command = hurry_toggle(entity, true, false, true).expect("command");
        assert_eq!(command.kind, DialogueCommandKind::HurryUp(false));
    }

    #[test]
    fn test_hurry_toggle_ignores_untouched_box() {
        let entity = Entity::from_raw(7);
        assert!(hurry_toggle(entity, true, true, false).is_none());
        assert!(hurry_toggle(entity, false, false, true).is_none());
    }
}
