//! Speed model: turns the user-facing speed into per-tick reveal rates.

/// Speed every multiplier is added to.
pub const BASE_SPEED: f32 = 1.0;
/// Floor for the effective speed so tick intervals stay finite and positive.
pub const MIN_EFFECTIVE_SPEED: f32 = 0.05;
/// Typewriter wait between steps at effective speed 1.0, in seconds.
pub const TYPEWRITER_BASE_INTERVAL: f32 = 0.015;
/// Progress multiplier while hurry-up is held.
pub const HURRY_UP_FACTOR: usize = 5;
/// Opacity units per frame for each character-per-tick at speed 1.0.
pub const FADE_OPACITY_SCALE: f32 = 4.0;

/// Effective speeds above this reveal two characters per cycle.
const DOUBLE_STEP_THRESHOLD: f32 = 2.0;
/// Effective speeds above this reveal three characters per cycle.
const TRIPLE_STEP_THRESHOLD: f32 = 2.5;

/// Progress a strategy may make in a single step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRate {
    /// Characters revealed per typewriter tick.
    pub characters: usize,
    /// Opacity units (0-255 scale) added per fade frame.
    pub opacity_delta: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedModel {
    /// Added to [`BASE_SPEED`] to form the effective speed.
    pub speed_multiplier: f32,
    /// Characters per cycle before the speed tiers are applied.
    pub characters_per_cycle: usize,
}

impl Default for SpeedModel {
    fn default() -> Self {
        Self {
            speed_multiplier: 0.0,
            characters_per_cycle: 1,
        }
    }
}

impl SpeedModel {
    pub fn new(speed_multiplier: f32, characters_per_cycle: usize) -> Self {
        Self {
            speed_multiplier,
            characters_per_cycle,
        }
    }

    /// `BASE_SPEED + speed_multiplier`, floored at [`MIN_EFFECTIVE_SPEED`].
    /// A NaN multiplier also lands on the floor.
    pub fn effective_speed(&self) -> f32 {
        (BASE_SPEED + self.speed_multiplier).max(MIN_EFFECTIVE_SPEED)
    }

    /// Characters per tick without hurry-up: `<= 2.0 -> 1x`, `<= 2.5 -> 2x`, `> 2.5 -> 3x`.
    pub fn characters_per_tick(&self) -> usize {
        let speed = self.effective_speed();
        let tier = if speed <= DOUBLE_STEP_THRESHOLD {
            1
        } else if speed <= TRIPLE_STEP_THRESHOLD {
            2
        } else {
            3
        };
        self.characters_per_cycle.max(1) * tier
    }

    /// Characters per tick, including the hurry-up factor.
    pub fn effective_characters_per_tick(&self, hurry_up: bool) -> usize {
        let base = self.characters_per_tick();
        if hurry_up {
            base * HURRY_UP_FACTOR
        } else {
            base
        }
    }

    /// Wall-clock wait between typewriter steps.
    pub fn tick_interval(&self) -> f32 {
        TYPEWRITER_BASE_INTERVAL / self.effective_speed()
    }

    /// Opacity added to each fading character per frame.
    pub fn fade_opacity_delta(&self, hurry_up: bool) -> f32 {
        self.effective_characters_per_tick(hurry_up) as f32
            * self.effective_speed()
            * FADE_OPACITY_SCALE
    }

    pub fn step_rate(&self, hurry_up: bool) -> StepRate {
        StepRate {
            characters: self.effective_characters_per_tick(hurry_up),
            opacity_delta: self.fade_opacity_delta(hurry_up),
        }
    }
}
