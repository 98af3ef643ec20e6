//! Build methods and the step-function interface every reveal strategy implements.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::fade::FadeReveal;
use super::instant::InstantReveal;
use super::speed::StepRate;
use super::surface::RevealSurface;
use super::typewriter::TypewriterReveal;

/// Visual strategy used to reveal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMethod {
    Instant,
    #[default]
    Typewriter,
    Fade,
}

impl BuildMethod {
    /// Returns all build methods for iteration.
    pub fn all() -> &'static [BuildMethod] {
        &[BuildMethod::Instant, BuildMethod::Typewriter, BuildMethod::Fade]
    }

    pub fn label(&self) -> &'static str {
        match self {
            BuildMethod::Instant => "instant",
            BuildMethod::Typewriter => "typewriter",
            BuildMethod::Fade => "fade",
        }
    }

    /// Next method in display order, wrapping around.
    pub fn next(&self) -> BuildMethod {
        match self {
            BuildMethod::Instant => BuildMethod::Typewriter,
            BuildMethod::Typewriter => BuildMethod::Fade,
            BuildMethod::Fade => BuildMethod::Instant,
        }
    }

    /// Creates a fresh, unprepared strategy for this method.
    pub fn strategy(&self) -> Box<dyn RevealStrategy> {
        match self {
            BuildMethod::Instant => Box::new(InstantReveal),
            BuildMethod::Typewriter => Box::new(TypewriterReveal::default()),
            BuildMethod::Fade => Box::new(FadeReveal::default()),
        }
    }
}

impl fmt::Display for BuildMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BuildMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instant" => Ok(BuildMethod::Instant),
            "typewriter" => Ok(BuildMethod::Typewriter),
            "fade" => Ok(BuildMethod::Fade),
            other => Err(format!(
                "unknown build method '{}' (expected instant, typewriter or fade)",
                other
            )),
        }
    }
}

/// How often the driver should step a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Once per elapsed typewriter interval.
    Timed,
    /// Once per rendered frame.
    PerFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Finished,
}

/// Texts a strategy prepares the surface with.
#[derive(Debug, Clone, Copy)]
pub struct RevealTexts<'a> {
    /// Already-settled prefix, shown immediately.
    pub pre_text: &'a str,
    /// `pre_text` followed by the newly requested text.
    pub full_text: &'a str,
}

/// A resumable reveal process. The driver calls [`RevealStrategy::prepare`] once,
/// then [`RevealStrategy::step`] until it reports [`StepOutcome::Finished`]. Dropping
/// the strategy cancels it.
pub trait RevealStrategy: fmt::Debug + Send + Sync {
    fn method(&self) -> BuildMethod;

    fn pacing(&self) -> Pacing;

    /// Puts the surface into its starting state. May finish without any steps.
    fn prepare(&mut self, surface: &mut dyn RevealSurface, texts: RevealTexts<'_>) -> StepOutcome;

    fn step(&mut self, surface: &mut dyn RevealSurface, rate: StepRate) -> StepOutcome;

    /// Jumps the surface to the fully revealed state.
    fn force_complete(&mut self, surface: &mut dyn RevealSurface);
}

/// Lays out `pre_text`, then `full_text`, returning the character count of the
/// pre-text as measured before the surface's table is rebuilt for the full text.
pub(crate) fn stage_texts(surface: &mut dyn RevealSurface, texts: RevealTexts<'_>) -> usize {
    surface.set_text(texts.pre_text);
    surface.force_relayout();
    let pre_count = surface.character_count();

    surface.set_text(texts.full_text);
    surface.force_relayout();
    pre_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_method() {
        assert_eq!("fade".parse::<BuildMethod>(), Ok(BuildMethod::Fade));
        assert_eq!(" Typewriter ".parse::<BuildMethod>(), Ok(BuildMethod::Typewriter));
        assert_eq!("INSTANT".parse::<BuildMethod>(), Ok(BuildMethod::Instant));
        assert!("scroll".parse::<BuildMethod>().is_err());
    }

    #[test]
    fn test_next_cycles_through_all() {
        let mut method = BuildMethod::Instant;
        for _ in 0..BuildMethod::all().len() {
            method = method.next();
        }
        assert_eq!(method, BuildMethod::Instant);
    }

    #[test]
    fn test_strategy_matches_method() {
        for method in BuildMethod::all() {
            assert_eq!(method.strategy().method(), *method);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&BuildMethod::Fade).unwrap();
        assert_eq!(json, "\"fade\"");
        let parsed: BuildMethod = serde_json::from_str("\"typewriter\"").unwrap();
        assert_eq!(parsed, BuildMethod::Typewriter);
    }
}
