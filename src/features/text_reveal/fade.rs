//! Fade reveal: characters ramp from transparent to opaque inside a sliding window.
//!
//! The window `[min_range, max_range)` holds the characters currently fading. A new
//! character joins once the trailing one is past [`FADE_IN_THRESHOLD`], and characters
//! leave from the front once they are settled. Progress is measured in opacity units
//! per frame, so wall-clock duration follows the frame rate.

use super::instant::reveal_all;
use super::speed::StepRate;
use super::strategy::{stage_texts, BuildMethod, Pacing, RevealStrategy, RevealTexts, StepOutcome};
use super::surface::{RevealSurface, ALPHA_OPAQUE};

/// Alpha the trailing character must exceed before the next one starts fading.
pub const FADE_IN_THRESHOLD: f32 = 15.0;

const OPAQUE: f32 = ALPHA_OPAQUE as f32;

#[derive(Debug, Clone, Default)]
pub struct FadeReveal {
    /// Per-character alpha, 0.0..=255.0. Reallocated on every prepare.
    alphas: Vec<f32>,
    min_range: usize,
    max_range: usize,
    pre_text_length: usize,
}

impl FadeReveal {
    pub fn window(&self) -> (usize, usize) {
        (self.min_range, self.max_range)
    }

    pub fn alphas(&self) -> &[f32] {
        &self.alphas
    }

    pub fn pre_text_length(&self) -> usize {
        self.pre_text_length
    }

    pub fn total(&self) -> usize {
        self.alphas.len()
    }

    fn is_settled(&self, surface: &dyn RevealSurface, index: usize) -> bool {
        !surface.is_character_visible(index) || self.alphas[index] >= OPAQUE
    }

    fn is_done(&self) -> bool {
        let total = self.total();
        self.min_range >= total && self.max_range >= total
    }
}

impl RevealStrategy for FadeReveal {
    fn method(&self) -> BuildMethod {
        BuildMethod::Fade
    }

    fn pacing(&self) -> Pacing {
        Pacing::PerFrame
    }

    fn prepare(&mut self, surface: &mut dyn RevealSurface, texts: RevealTexts<'_>) -> StepOutcome {
        // Pre-text length must come from the pre-text layout; the full-text layout
        // rebuilds the character table.
        let pre_text_length = stage_texts(surface, texts);
        let total = surface.character_count();
        surface.set_max_visible_count(total);

        self.pre_text_length = pre_text_length.min(total);
        self.alphas = (0..total)
            .map(|index| if index < self.pre_text_length { OPAQUE } else { 0.0 })
            .collect();
        for (index, alpha) in self.alphas.iter().enumerate() {
            surface.set_alpha(index, *alpha as u8);
        }
        surface.commit_color_updates();

        self.min_range = self.pre_text_length;
        self.max_range = self.pre_text_length;
        if self.pre_text_length >= total {
            return StepOutcome::Finished;
        }
        self.max_range += 1;
        StepOutcome::Continue
    }

    fn step(&mut self, surface: &mut dyn RevealSurface, rate: StepRate) -> StepOutcome {
        if self.is_done() {
            return StepOutcome::Finished;
        }

        for index in self.min_range..self.max_range {
            if !surface.is_character_visible(index) {
                continue;
            }
            let alpha = (self.alphas[index] + rate.opacity_delta).min(OPAQUE);
            self.alphas[index] = alpha;
            surface.set_alpha(index, alpha as u8);
        }
        surface.commit_color_updates();

        while self.min_range < self.max_range && self.is_settled(surface, self.min_range) {
            self.min_range += 1;
        }

        let trailing = self.max_range - 1;
        let trailing_invisible = !surface.is_character_visible(trailing);
        if (self.alphas[trailing] > FADE_IN_THRESHOLD || trailing_invisible)
            && self.max_range < self.total()
        {
            self.max_range += 1;
        }

        if self.is_done() {
            StepOutcome::Finished
        } else {
            StepOutcome::Continue
        }
    }

    fn force_complete(&mut self, surface: &mut dyn RevealSurface) {
        reveal_all(surface);
        let total = surface.character_count();
        self.alphas = vec![OPAQUE; total];
        self.min_range = total;
        self.max_range = total;
    }
}
