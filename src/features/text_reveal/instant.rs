//! Instant reveal: the whole text appears with zero ticks.

use super::speed::StepRate;
use super::strategy::{BuildMethod, Pacing, RevealStrategy, RevealTexts, StepOutcome};
use super::surface::{RevealSurface, ALPHA_OPAQUE};

#[derive(Debug, Clone, Copy, Default)]
pub struct InstantReveal;

impl RevealStrategy for InstantReveal {
    fn method(&self) -> BuildMethod {
        BuildMethod::Instant
    }

    fn pacing(&self) -> Pacing {
        Pacing::PerFrame
    }

    fn prepare(&mut self, surface: &mut dyn RevealSurface, texts: RevealTexts<'_>) -> StepOutcome {
        surface.set_text(texts.full_text);
        surface.force_relayout();
        self.force_complete(surface);
        StepOutcome::Finished
    }

    fn step(&mut self, _surface: &mut dyn RevealSurface, _rate: StepRate) -> StepOutcome {
        StepOutcome::Finished
    }

    fn force_complete(&mut self, surface: &mut dyn RevealSurface) {
        reveal_all(surface);
    }
}

/// Shows every character at full opacity.
pub(crate) fn reveal_all(surface: &mut dyn RevealSurface) {
    let total = surface.character_count();
    surface.set_max_visible_count(total);
    for index in 0..total {
        surface.set_alpha(index, ALPHA_OPAQUE);
    }
    surface.commit_color_updates();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::text_reveal::surface::GlyphBuffer;

    #[test]
    fn test_instant_finishes_during_prepare() {
        let mut surface = GlyphBuffer::default();
        let mut reveal = InstantReveal;
        let outcome = reveal.prepare(
            &mut surface,
            RevealTexts {
                pre_text: "Ahoy",
                full_text: "Ahoy there",
            },
        );

        assert_eq!(outcome, StepOutcome::Finished);
        assert_eq!(surface.text(), "Ahoy there");
        assert_eq!(surface.revealed_count(), 10);
        assert!((0..10).all(|i| surface.displayed_alpha(i) == ALPHA_OPAQUE));
    }
}
