//! Systems that connect dialogue surfaces to the reveal engine.

use bevy::prelude::*;

use crate::components::dialogue_text::{glyph_color, DialogueGlyph, DialogueText};
use crate::events::{DialogueCommand, DialogueCommandKind, RevealFinishedEvent};
use crate::features::text_reveal::RevealSurface;

/// System that applies queued `DialogueCommand`s to their target surfaces.
pub fn apply_dialogue_commands(
    mut commands: EventReader<DialogueCommand>,
    mut query: Query<&mut DialogueText>,
) {
    for command in commands.read() {
        let Ok(mut dialogue) = query.get_mut(command.entity) else {
            warn!("Dialogue command for {:?} ignored: no DialogueText", command.entity);
            continue;
        };
        let architect = &mut dialogue.architect;

        match &command.kind {
            DialogueCommandKind::Build(text) => {
                architect.build(text.as_str());
            }
            DialogueCommandKind::Append(text) => {
                architect.append(text.as_str());
            }
            DialogueCommandKind::Stop => architect.stop(),
            DialogueCommandKind::ForceComplete => architect.force_complete(),
            DialogueCommandKind::HurryUp(hurry_up) => architect.set_hurry_up(*hurry_up),
            DialogueCommandKind::SetMethod(method) => architect.set_build_method(*method),
            DialogueCommandKind::SetSpeed(speed) => architect.set_speed(*speed),
        }
    }
}

/// System that steps every running reveal by the frame's delta time and reports
/// finished reveals.
pub fn drive_text_reveal(
    time: Res<Time>,
    mut query: Query<(Entity, &mut DialogueText)>,
    mut finished: EventWriter<RevealFinishedEvent>,
) {
    let delta = time.delta_secs();

    for (entity, mut dialogue) in &mut query {
        if !dialogue.architect.is_building() && !dialogue.architect.has_finished() {
            continue;
        }

        dialogue.architect.tick(delta);

        for done in dialogue.architect.take_finished() {
            debug!("Dialogue {:?} finished {} reveal", entity, done.method);
            finished.send(RevealFinishedEvent {
                entity,
                handle: done.handle,
                method: done.method,
                forced: done.forced,
            });
        }
    }
}

/// System that rebuilds the per-glyph `TextSpan` children whenever the glyph buffer
/// has been laid out again.
pub fn sync_glyph_spans(
    mut commands: Commands,
    mut roots: Query<
        (Entity, &mut DialogueText, Option<&Children>, Option<&TextFont>),
        Changed<DialogueText>,
    >,
    glyph_query: Query<(), With<DialogueGlyph>>,
) {
    for (entity, mut dialogue, children, font) in &mut roots {
        if !dialogue.needs_span_rebuild() {
            continue;
        }

        if let Some(children) = children {
            for &child in children.iter() {
                if glyph_query.contains(child) {
                    commands.entity(child).despawn_recursive();
                }
            }
        }

        let surface = dialogue.architect.surface();
        let revision = surface.layout_revision();
        let color = surface.color();
        let font = font.cloned().unwrap_or_default();
        let spans: Vec<_> = surface
            .glyphs()
            .iter()
            .enumerate()
            .map(|(index, glyph)| {
                (
                    TextSpan::new(glyph.character.to_string()),
                    font.clone(),
                    TextColor(glyph_color(color, surface.displayed_alpha(index))),
                    DialogueGlyph { index },
                )
            })
            .collect();
        let glyph_count = spans.len();

        commands.entity(entity).with_children(|parent| {
            for span in spans {
                parent.spawn(span);
            }
        });

        dialogue.rendered_revision = Some(revision);
        trace!("Rebuilt {} glyph spans for {:?}", glyph_count, entity);
    }
}

/// System that copies each glyph's displayed alpha into its span's `TextColor`.
/// Glyphs beyond the max-visible count are drawn fully transparent.
pub fn apply_glyph_alpha(
    roots: Query<(&DialogueText, &Children), Changed<DialogueText>>,
    mut glyphs: Query<(&DialogueGlyph, &mut TextColor)>,
) {
    for (dialogue, children) in &roots {
        let surface = dialogue.architect.surface();
        let color = surface.color();

        for &child in children.iter() {
            let Ok((glyph, mut text_color)) = glyphs.get_mut(child) else {
                continue;
            };
            let target = glyph_color(color, surface.displayed_alpha(glyph.index));
            if text_color.0 != target {
                text_color.0 = target;
            }
        }
    }
}
