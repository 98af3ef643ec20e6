//! Dialogue text components.
//!
//! A `DialogueText` root owns the reveal engine for one text widget. The widget itself is
//! a Bevy text root (UI `Text` or world-space `Text2d`) whose `TextSpan` children, one per
//! glyph, are kept in sync with the engine's glyph buffer.

use bevy::prelude::*;

use crate::features::text_reveal::{Architect, GlyphBuffer, Rgba8};
use crate::resources::reveal_settings::RevealSettings;

/// Which kind of Bevy text root backs a dialogue surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceSpace {
    /// `bevy_ui` text node, laid out in screen space.
    #[default]
    Screen,
    /// `Text2d` placed in the world with a `Transform`.
    World,
}

/// Reveal engine attached to a text root entity.
#[derive(Component, Debug)]
pub struct DialogueText {
    pub architect: Architect<GlyphBuffer>,
    pub space: SurfaceSpace,
    /// Glyph buffer layout revision the child spans were built from.
    pub(crate) rendered_revision: Option<u64>,
}

impl DialogueText {
    pub fn new(space: SurfaceSpace) -> Self {
        Self::from_settings(&RevealSettings::default(), space)
    }

    /// Creates a dialogue surface using the configured method, speed and color.
    pub fn from_settings(settings: &RevealSettings, space: SurfaceSpace) -> Self {
        let architect = Architect::new(GlyphBuffer::new(settings.text_color))
            .with_build_method(settings.build_method)
            .with_speed_model(settings.speed_model());
        Self {
            architect,
            space,
            rendered_revision: None,
        }
    }

    /// True when the child spans no longer match the glyph buffer layout.
    pub fn needs_span_rebuild(&self) -> bool {
        self.rendered_revision != Some(self.architect.surface().layout_revision())
    }
}

/// Marks a `TextSpan` child as the rendering of one glyph.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueGlyph {
    pub index: usize,
}

/// Converts an engine color to a Bevy color with an explicit alpha.
pub fn glyph_color(color: Rgba8, alpha: u8) -> Color {
    Color::srgba_u8(color.r, color.g, color.b, alpha)
}
