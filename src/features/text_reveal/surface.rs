//! Rendering-surface capability consumed by the reveal strategies.
//!
//! The host owns the real text widget. Strategies only ever talk to it through
//! [`RevealSurface`], so the same engine drives a screen-space dialogue box or a
//! world-space label. [`GlyphBuffer`] is the in-memory backing used by the ECS layer.

use serde::{Deserialize, Serialize};

/// Fully opaque alpha value.
pub const ALPHA_OPAQUE: u8 = 255;

/// 8-bit RGBA color applied uniformly to every glyph's RGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Narrow contract between the reveal engine and a host text widget.
///
/// Character-level queries are only valid after [`RevealSurface::force_relayout`]
/// has been called following a text mutation.
pub trait RevealSurface: Send + Sync {
    /// Replaces the backing text. Invalidates the character table.
    fn set_text(&mut self, text: &str);
    /// Returns the backing text.
    fn text(&self) -> &str;
    /// Rebuilds the character table from the backing text.
    fn force_relayout(&mut self);
    /// Number of characters in the last layout.
    fn character_count(&self) -> usize;
    /// False for whitespace and control characters, which have no glyph.
    fn is_character_visible(&self, index: usize) -> bool;
    /// Characters at or beyond this index are not drawn.
    fn set_max_visible_count(&mut self, count: usize);
    fn max_visible_count(&self) -> usize;
    /// Staged alpha of the character at `index`.
    fn alpha(&self, index: usize) -> u8;
    fn set_alpha(&mut self, index: usize, alpha: u8);
    /// Pushes staged alpha values to the displayed buffer.
    fn commit_color_updates(&mut self);
    fn color(&self) -> Rgba8;
    fn set_color(&mut self, color: Rgba8);
}

/// One laid-out character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub character: char,
    /// Whether the character produces a drawable glyph.
    pub visible: bool,
}

/// In-memory [`RevealSurface`]: one glyph per `char`, with a staged and a
/// displayed alpha channel.
#[derive(Debug, Clone)]
pub struct GlyphBuffer {
    text: String,
    glyphs: Vec<Glyph>,
    staged_alpha: Vec<u8>,
    displayed_alpha: Vec<u8>,
    max_visible: usize,
    color: Rgba8,
    layout_dirty: bool,
    layout_revision: u64,
    color_revision: u64,
}

impl Default for GlyphBuffer {
    fn default() -> Self {
        Self::new(Rgba8::WHITE)
    }
}

impl GlyphBuffer {
    pub fn new(color: Rgba8) -> Self {
        Self {
            text: String::new(),
            glyphs: Vec::new(),
            staged_alpha: Vec::new(),
            displayed_alpha: Vec::new(),
            max_visible: usize::MAX,
            color,
            layout_dirty: false,
            layout_revision: 0,
            color_revision: 0,
        }
    }

    /// Glyph table from the last relayout.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// True when the text changed since the last relayout.
    pub fn is_layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    /// Bumped on every relayout. Renderers rebuild their per-glyph spans when it changes.
    pub fn layout_revision(&self) -> u64 {
        self.layout_revision
    }

    /// Bumped on every color commit.
    pub fn color_revision(&self) -> u64 {
        self.color_revision
    }

    /// Whether the glyph at `index` falls inside the max-visible count.
    pub fn is_revealed(&self, index: usize) -> bool {
        index < self.glyphs.len() && index < self.max_visible
    }

    /// Alpha a renderer should draw for `index`: the committed alpha, or zero when the
    /// glyph is past the max-visible count.
    pub fn displayed_alpha(&self, index: usize) -> u8 {
        if !self.is_revealed(index) {
            return 0;
        }
        self.displayed_alpha.get(index).copied().unwrap_or(0)
    }

    /// Number of glyphs currently drawn, ignoring opacity.
    pub fn revealed_count(&self) -> usize {
        self.glyphs.len().min(self.max_visible)
    }
}

impl RevealSurface for GlyphBuffer {
    fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text.clear();
            self.text.push_str(text);
        }
        self.layout_dirty = true;
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn force_relayout(&mut self) {
        self.glyphs = self
            .text
            .chars()
            .map(|character| Glyph {
                character,
                visible: !(character.is_whitespace() || character.is_control()),
            })
            .collect();
        self.staged_alpha = vec![self.color.a; self.glyphs.len()];
        self.displayed_alpha = self.staged_alpha.clone();
        self.layout_dirty = false;
        self.layout_revision += 1;
    }

    fn character_count(&self) -> usize {
        self.glyphs.len()
    }

    fn is_character_visible(&self, index: usize) -> bool {
        self.glyphs.get(index).is_some_and(|glyph| glyph.visible)
    }

    fn set_max_visible_count(&mut self, count: usize) {
        self.max_visible = count;
    }

    fn max_visible_count(&self) -> usize {
        self.max_visible
    }

    fn alpha(&self, index: usize) -> u8 {
        self.staged_alpha.get(index).copied().unwrap_or(0)
    }

    fn set_alpha(&mut self, index: usize, alpha: u8) {
        if let Some(slot) = self.staged_alpha.get_mut(index) {
            *slot = alpha;
        }
    }

    fn commit_color_updates(&mut self) {
        self.displayed_alpha.copy_from_slice(&self.staged_alpha);
        self.color_revision += 1;
    }

    fn color(&self) -> Rgba8 {
        self.color
    }

    fn set_color(&mut self, color: Rgba8) {
        self.color = color;
    }
}
