//! Typewriter reveal: grows the visible character count by a fixed step per tick.
//!
//! Whitespace occupies index space like any other character, so a tick that lands on a
//! space reveals nothing the eye can see.

use super::instant::reveal_all;
use super::speed::StepRate;
use super::strategy::{stage_texts, BuildMethod, Pacing, RevealStrategy, RevealTexts, StepOutcome};
use super::surface::RevealSurface;

#[derive(Debug, Clone, Default)]
pub struct TypewriterReveal {
    /// Characters currently within the max-visible count.
    visible_count: usize,
    total: usize,
}

impl TypewriterReveal {
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_done(&self) -> bool {
        self.visible_count >= self.total
    }
}

impl RevealStrategy for TypewriterReveal {
    fn method(&self) -> BuildMethod {
        BuildMethod::Typewriter
    }

    fn pacing(&self) -> Pacing {
        Pacing::Timed
    }

    fn prepare(&mut self, surface: &mut dyn RevealSurface, texts: RevealTexts<'_>) -> StepOutcome {
        let pre_count = stage_texts(surface, texts);
        surface.set_max_visible_count(pre_count);

        self.visible_count = pre_count;
        self.total = surface.character_count();

        if self.is_done() {
            StepOutcome::Finished
        } else {
            StepOutcome::Continue
        }
    }

    fn step(&mut self, surface: &mut dyn RevealSurface, rate: StepRate) -> StepOutcome {
        self.visible_count = (self.visible_count + rate.characters).min(self.total);
        surface.set_max_visible_count(self.visible_count);

        if self.is_done() {
            StepOutcome::Finished
        } else {
            StepOutcome::Continue
        }
    }

    fn force_complete(&mut self, surface: &mut dyn RevealSurface) {
        reveal_all(surface);
        self.total = surface.character_count();
        self.visible_count = self.total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::text_reveal::speed::SpeedModel;
    use crate::features::text_reveal::surface::GlyphBuffer;

    fn prepared(pre_text: &str, full_text: &str) -> (TypewriterReveal, GlyphBuffer, StepOutcome) {
        let mut surface = GlyphBuffer::default();
        let mut reveal = TypewriterReveal::default();
        let outcome = reveal.prepare(&mut surface, RevealTexts { pre_text, full_text });
        (reveal, surface, outcome)
    }

    #[test]
    fn test_prepare_hides_only_target() {
        let (reveal, surface, outcome) = prepared("Hi", "Hi there");
        assert_eq!(outcome, StepOutcome::Continue);
        assert_eq!(surface.text(), "Hi there");
        assert_eq!(reveal.visible_count(), 2);
        assert_eq!(surface.revealed_count(), 2);
    }

    #[test]
    fn test_two_ticks_reveal_hi() {
        let (mut reveal, mut surface, _) = prepared("", "Hi");
        let rate = SpeedModel::default().step_rate(false);

        assert_eq!(reveal.step(&mut surface, rate), StepOutcome::Continue);
        assert_eq!(surface.revealed_count(), 1);
        assert_eq!(reveal.step(&mut surface, rate), StepOutcome::Finished);
        assert_eq!(surface.revealed_count(), 2);
    }

    #[test]
    fn test_count_is_monotonic_and_bounded() {
        let text = "The tide waits for no one.";
        let (mut reveal, mut surface, _) = prepared("", text);
        let rate = SpeedModel::new(2.0, 1).step_rate(true);
        let total = text.chars().count();

        let mut last = 0;
        let mut ticks = 0;
        loop {
            let outcome = reveal.step(&mut surface, rate);
            assert!(reveal.visible_count() >= last);
            assert!(reveal.visible_count() <= total);
            last = reveal.visible_count();
            ticks += 1;
            if outcome == StepOutcome::Finished {
                break;
            }
            assert!(ticks < total, "typewriter failed to finish");
        }
        assert_eq!(surface.revealed_count(), total);
    }

    #[test]
    fn test_empty_target_finishes_in_prepare() {
        let (reveal, surface, outcome) = prepared("Done", "Done");
        assert_eq!(outcome, StepOutcome::Finished);
        assert!(reveal.is_done());
        assert_eq!(surface.revealed_count(), 4);
    }

    #[test]
    fn test_force_complete_reveals_everything() {
        let (mut reveal, mut surface, _) = prepared("", "Avast");
        reveal.force_complete(&mut surface);
        assert!(reveal.is_done());
        assert_eq!(surface.revealed_count(), 5);
    }
}
