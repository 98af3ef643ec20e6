//! Session controller: owns the reveal session for one text surface and runs at most
//! one reveal process at a time.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use bevy::log::{debug, trace};

use super::speed::SpeedModel;
use super::strategy::{BuildMethod, Pacing, RevealStrategy, RevealTexts, StepOutcome};
use super::surface::{RevealSurface, Rgba8};

/// Finished records kept for callers that never drain them; the oldest are dropped first.
pub const MAX_PENDING_FINISHED: usize = 16;

/// Lifecycle of a reveal process as seen through its handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStatus {
    Running,
    /// Finished naturally or through force-complete.
    Completed,
    /// Stopped, or superseded by a later build/append.
    Cancelled,
}

impl RevealStatus {
    fn to_u8(self) -> u8 {
        match self {
            RevealStatus::Running => 0,
            RevealStatus::Completed => 1,
            RevealStatus::Cancelled => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => RevealStatus::Running,
            1 => RevealStatus::Completed,
            _ => RevealStatus::Cancelled,
        }
    }
}

/// Handle to a reveal process returned by [`Architect::build`] and [`Architect::append`].
/// Poll [`RevealHandle::status`] to wait for completion.
#[derive(Debug, Clone)]
pub struct RevealHandle {
    id: u64,
    status: Arc<AtomicU8>,
}

impl RevealHandle {
    fn new(id: u64) -> Self {
        Self {
            id,
            status: Arc::new(AtomicU8::new(RevealStatus::Running.to_u8())),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn status(&self) -> RevealStatus {
        RevealStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    pub fn is_finished(&self) -> bool {
        self.status() != RevealStatus::Running
    }

    fn settle(&self, status: RevealStatus) {
        self.status.store(status.to_u8(), Ordering::Release);
    }
}

impl PartialEq for RevealHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RevealHandle {}

/// Record of a process that reached the fully revealed state.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealFinished {
    pub handle: RevealHandle,
    pub method: BuildMethod,
    /// True when reached through [`Architect::force_complete`].
    pub forced: bool,
}

#[derive(Debug)]
struct RevealProcess {
    handle: RevealHandle,
    strategy: Box<dyn RevealStrategy>,
    /// Time carried toward the next typewriter step.
    elapsed: f32,
}

/// Reveals text on a [`RevealSurface`] using the selected [`BuildMethod`].
#[derive(Debug)]
pub struct Architect<S: RevealSurface> {
    surface: S,
    pre_text: String,
    target_text: String,
    full_text: String,
    build_method: BuildMethod,
    speed: SpeedModel,
    hurry_up: bool,
    active: Option<RevealProcess>,
    next_process_id: u64,
    finished: Vec<RevealFinished>,
}

impl<S: RevealSurface + Default> Default for Architect<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: RevealSurface> Architect<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            pre_text: String::new(),
            target_text: String::new(),
            full_text: String::new(),
            build_method: BuildMethod::default(),
            speed: SpeedModel::default(),
            hurry_up: false,
            active: None,
            next_process_id: 0,
            finished: Vec::new(),
        }
    }

    pub fn with_build_method(mut self, method: BuildMethod) -> Self {
        self.build_method = method;
        self
    }

    pub fn with_speed_model(mut self, speed: SpeedModel) -> Self {
        self.speed = speed;
        self
    }

    /// Reveals `text` from scratch, discarding whatever the surface showed.
    pub fn build(&mut self, text: impl Into<String>) -> RevealHandle {
        self.pre_text.clear();
        self.target_text = text.into();
        self.start()
    }

    /// Reveals `text` after the text currently on the surface, which stays visible.
    pub fn append(&mut self, text: impl Into<String>) -> RevealHandle {
        self.pre_text = self.surface.text().to_string();
        self.target_text = text.into();
        self.start()
    }

    /// Cancels the active process. Hurry-up is left untouched.
    pub fn stop(&mut self) {
        if let Some(process) = self.active.take() {
            debug!(
                "Stopped {} reveal #{}",
                process.strategy.method(),
                process.handle.id()
            );
            process.handle.settle(RevealStatus::Cancelled);
        }
    }

    /// Jumps straight to the fully revealed state and finishes the active process.
    pub fn force_complete(&mut self) {
        if self.surface.text() != self.full_text {
            self.surface.set_text(&self.full_text);
            self.surface.force_relayout();
        }

        match self.active.take() {
            Some(mut process) => {
                process.strategy.force_complete(&mut self.surface);
                debug!(
                    "Force-completed {} reveal #{}",
                    process.strategy.method(),
                    process.handle.id()
                );
                self.finish(process, true);
            }
            None => {
                self.build_method.strategy().force_complete(&mut self.surface);
                self.hurry_up = false;
            }
        }
    }

    /// Advances the active process by `delta_seconds` of wall-clock time.
    ///
    /// Timed strategies step once per elapsed tick interval; per-frame strategies step
    /// exactly once per call. Returns true while a process is still running.
    pub fn tick(&mut self, delta_seconds: f32) -> bool {
        let Some(process) = self.active.as_mut() else {
            return false;
        };

        let rate = self.speed.step_rate(self.hurry_up);
        let outcome = match process.strategy.pacing() {
            Pacing::PerFrame => process.strategy.step(&mut self.surface, rate),
            Pacing::Timed => {
                let interval = self.speed.tick_interval();
                process.elapsed += delta_seconds.max(0.0);
                let mut outcome = StepOutcome::Continue;
                while process.elapsed >= interval {
                    process.elapsed -= interval;
                    outcome = process.strategy.step(&mut self.surface, rate);
                    if outcome == StepOutcome::Finished {
                        break;
                    }
                }
                outcome
            }
        };
        trace!("Reveal #{} stepped: {:?}", process.handle.id(), outcome);

        if outcome == StepOutcome::Finished {
            if let Some(process) = self.active.take() {
                self.finish(process, false);
            }
            return false;
        }
        true
    }

    /// Drains the processes that finished since the last call.
    ///
    /// Hosts outside the ECS should drain this after each `build`/`append`/`tick`; only
    /// the latest [`MAX_PENDING_FINISHED`] records are retained otherwise.
    pub fn take_finished(&mut self) -> Vec<RevealFinished> {
        std::mem::take(&mut self.finished)
    }

    pub fn has_finished(&self) -> bool {
        !self.finished.is_empty()
    }

    pub fn is_building(&self) -> bool {
        self.active.is_some()
    }

    /// Handle of the running process, if any.
    pub fn active_handle(&self) -> Option<&RevealHandle> {
        self.active.as_ref().map(|process| &process.handle)
    }

    /// Method of the running process, which may differ from [`Architect::build_method`]
    /// if that was changed mid-reveal.
    pub fn active_method(&self) -> Option<BuildMethod> {
        self.active.as_ref().map(|process| process.strategy.method())
    }

    pub fn hurry_up(&self) -> bool {
        self.hurry_up
    }

    pub fn set_hurry_up(&mut self, hurry_up: bool) {
        self.hurry_up = hurry_up;
    }

    pub fn build_method(&self) -> BuildMethod {
        self.build_method
    }

    /// Takes effect on the next build or append.
    pub fn set_build_method(&mut self, method: BuildMethod) {
        self.build_method = method;
    }

    /// Multiplier added to the base speed.
    pub fn speed(&self) -> f32 {
        self.speed.speed_multiplier
    }

    pub fn set_speed(&mut self, speed_multiplier: f32) {
        self.speed.speed_multiplier = speed_multiplier;
    }

    pub fn effective_speed(&self) -> f32 {
        self.speed.effective_speed()
    }

    pub fn speed_model(&self) -> &SpeedModel {
        &self.speed
    }

    /// Text currently assigned to the surface.
    pub fn current_text(&self) -> &str {
        self.surface.text()
    }

    /// Text the surface shows once the reveal completes.
    pub fn full_target_text(&self) -> &str {
        &self.full_text
    }

    pub fn pre_text(&self) -> &str {
        &self.pre_text
    }

    pub fn target_text(&self) -> &str {
        &self.target_text
    }

    pub fn color(&self) -> Rgba8 {
        self.surface.color()
    }

    pub fn set_color(&mut self, color: Rgba8) {
        self.surface.set_color(color);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn start(&mut self) -> RevealHandle {
        self.stop();

        self.full_text = format!("{}{}", self.pre_text, self.target_text);

        let handle = RevealHandle::new(self.next_process_id);
        self.next_process_id += 1;

        let mut strategy = self.build_method.strategy();
        let outcome = strategy.prepare(
            &mut self.surface,
            RevealTexts {
                pre_text: &self.pre_text,
                full_text: &self.full_text,
            },
        );
        debug!(
            "Started {} reveal #{} ({} settled + {} new chars)",
            self.build_method,
            handle.id(),
            self.pre_text.chars().count(),
            self.target_text.chars().count()
        );

        let process = RevealProcess {
            handle: handle.clone(),
            strategy,
            elapsed: 0.0,
        };
        match outcome {
            StepOutcome::Finished => self.finish(process, false),
            StepOutcome::Continue => self.active = Some(process),
        }
        handle
    }

    fn finish(&mut self, process: RevealProcess, forced: bool) {
        process.handle.settle(RevealStatus::Completed);
        self.hurry_up = false;
        debug!(
            "Finished {} reveal #{}{}",
            process.strategy.method(),
            process.handle.id(),
            if forced { " (forced)" } else { "" }
        );
        if self.finished.len() == MAX_PENDING_FINISHED {
            self.finished.remove(0);
        }
        self.finished.push(RevealFinished {
            handle: process.handle,
            method: process.strategy.method(),
            forced,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::text_reveal::surface::{GlyphBuffer, ALPHA_OPAQUE};

    fn architect(method: BuildMethod) -> Architect<GlyphBuffer> {
        Architect::new(GlyphBuffer::default()).with_build_method(method)
    }

    /// Ticks with a frame time comfortably above the typewriter interval.
    fn run_to_end(architect: &mut Architect<GlyphBuffer>) -> usize {
        let mut ticks = 0;
        while architect.tick(0.016) {
            ticks += 1;
            assert!(ticks < 10_000, "reveal never finished");
        }
        ticks
    }

    fn assert_fully_revealed(architect: &Architect<GlyphBuffer>) {
        assert_eq!(architect.current_text(), architect.full_target_text());
        let surface = architect.surface();
        assert_eq!(surface.revealed_count(), surface.character_count());
        for index in 0..surface.character_count() {
            assert_eq!(surface.displayed_alpha(index), ALPHA_OPAQUE);
        }
    }

    #[test]
    fn test_build_hi_typewriter_two_ticks() {
        let mut architect = architect(BuildMethod::Typewriter);
        let handle = architect.build("Hi");
        assert!(architect.is_building());
        assert!((architect.speed_model().tick_interval() - 0.015).abs() < 1e-6);

        assert!(architect.tick(0.016));
        assert_eq!(architect.surface().revealed_count(), 1);
        assert!(!architect.tick(0.016));
        assert_eq!(architect.surface().revealed_count(), 2);

        assert!(!architect.is_building());
        assert_eq!(handle.status(), RevealStatus::Completed);
        assert_eq!(architect.current_text(), "Hi");
    }

    #[test]
    fn test_short_frames_accumulate_toward_tick() {
        let mut architect = architect(BuildMethod::Typewriter);
        architect.build("Hi");

        architect.tick(0.01);
        assert_eq!(architect.surface().revealed_count(), 0);
        architect.tick(0.01);
        assert_eq!(architect.surface().revealed_count(), 1);
    }

    #[test]
    fn test_long_frame_takes_several_steps() {
        let mut architect = architect(BuildMethod::Typewriter);
        architect.build("Hello");
        architect.tick(0.046);
        assert_eq!(architect.surface().revealed_count(), 3);
    }

    #[test]
    fn test_append_keeps_prefix_visible() {
        let mut architect = architect(BuildMethod::Typewriter);
        architect.build("Hi");
        run_to_end(&mut architect);

        architect.append("!");
        assert_eq!(architect.pre_text(), "Hi");
        assert_eq!(architect.target_text(), "!");
        assert_eq!(architect.full_target_text(), "Hi!");
        // "Hi" is visible straight away, only "!" animates.
        assert_eq!(architect.surface().revealed_count(), 2);

        assert_eq!(run_to_end(&mut architect), 0);
        assert_eq!(architect.current_text(), "Hi!");
        assert_eq!(architect.surface().revealed_count(), 3);
    }

    #[test]
    fn test_append_fade_never_reanimates_prefix() {
        let mut architect = architect(BuildMethod::Fade);
        architect.build("Hi");
        run_to_end(&mut architect);

        architect.append("!");
        let surface = architect.surface();
        assert_eq!(surface.displayed_alpha(0), ALPHA_OPAQUE);
        assert_eq!(surface.displayed_alpha(1), ALPHA_OPAQUE);
        assert_eq!(surface.displayed_alpha(2), 0);

        while architect.tick(0.016) {
            assert_eq!(architect.surface().displayed_alpha(0), ALPHA_OPAQUE);
            assert_eq!(architect.surface().displayed_alpha(1), ALPHA_OPAQUE);
        }
        assert_fully_revealed(&architect);
    }

    #[test]
    fn test_append_empty_is_idempotent() {
        for method in BuildMethod::all() {
            let mut architect = architect(*method);
            architect.build("X");
            run_to_end(&mut architect);

            for _ in 0..2 {
                let handle = architect.append("");
                assert!(!architect.is_building());
                assert_eq!(handle.status(), RevealStatus::Completed);
                assert_eq!(architect.current_text(), "X");
                assert_fully_revealed(&architect);
            }
        }
    }

    #[test]
    fn test_second_build_discards_first() {
        for method in BuildMethod::all() {
            let mut architect = architect(*method);
            let first = architect.build("First line, still revealing");
            architect.tick(0.016);

            let second = architect.build("Second");
            if *method != BuildMethod::Instant {
                assert_eq!(first.status(), RevealStatus::Cancelled);
            }
            assert_ne!(first, second);
            assert_eq!(architect.pre_text(), "");

            run_to_end(&mut architect);
            assert_eq!(architect.current_text(), "Second");
            assert_fully_revealed(&architect);
            assert_eq!(second.status(), RevealStatus::Completed);
        }
    }

    #[test]
    fn test_force_complete_for_every_method() {
        for method in BuildMethod::all() {
            let mut architect = architect(*method);
            architect.build("Dead men tell no tales");
            architect.tick(0.016);
            architect.set_hurry_up(true);

            architect.force_complete();
            assert!(!architect.is_building());
            assert!(!architect.hurry_up());
            assert_fully_revealed(&architect);

            let finished = architect.take_finished();
            assert_eq!(finished.len(), 1);
            assert_eq!(finished[0].method, *method);
            assert_eq!(finished[0].forced, *method != BuildMethod::Instant);
        }
    }

    #[test]
    fn test_force_complete_after_stop_still_reveals() {
        let mut architect = architect(BuildMethod::Fade);
        architect.build("Shiver me timbers");
        architect.tick(0.016);
        architect.stop();

        architect.force_complete();
        assert_fully_revealed(&architect);
    }

    #[test]
    fn test_stop_is_noop_when_idle_and_keeps_hurry_up() {
        let mut architect = architect(BuildMethod::Typewriter);
        architect.stop();
        assert!(!architect.is_building());

        let handle = architect.build("Avast ye");
        architect.set_hurry_up(true);
        architect.stop();
        assert!(architect.hurry_up());
        assert!(!architect.is_building());
        assert_eq!(handle.status(), RevealStatus::Cancelled);
        assert!(!architect.tick(1.0));
    }

    #[test]
    fn test_hurry_up_resets_on_natural_completion() {
        let mut architect = architect(BuildMethod::Typewriter);
        architect.build("Yo ho ho");
        architect.set_hurry_up(true);

        architect.tick(0.016);
        assert_eq!(architect.surface().revealed_count(), 5);
        run_to_end(&mut architect);
        assert!(!architect.hurry_up());
    }

    #[test]
    fn test_hurry_up_resets_when_fade_finishes_on_its_own() {
        let mut architect = architect(BuildMethod::Fade);
        architect.build("Yo ho ho");
        architect.set_hurry_up(true);

        assert!(architect.tick(0.016));
        assert_eq!(architect.surface().displayed_alpha(0), 20);
        assert!(architect.hurry_up());

        run_to_end(&mut architect);
        assert!(!architect.hurry_up());
        assert!(!architect.take_finished()[0].forced);
        assert_fully_revealed_visible_glyphs(&architect);
    }

    #[test]
    fn test_handle_reports_finished_once_settled() {
        let mut architect = architect(BuildMethod::Typewriter);
        let handle = architect.build("Ahoy");
        assert!(!handle.is_finished());
        assert_eq!(architect.active_handle(), Some(&handle));

        while !handle.is_finished() {
            architect.tick(0.016);
        }
        assert_eq!(handle.status(), RevealStatus::Completed);
        assert_eq!(architect.active_handle(), None);

        let stopped = architect.build("Belay that");
        architect.stop();
        assert!(stopped.is_finished());
        assert_eq!(stopped.status(), RevealStatus::Cancelled);
    }

    #[test]
    fn test_undrained_finished_queue_keeps_latest_records() {
        let mut architect = architect(BuildMethod::Instant);
        let mut last = None;
        for _ in 0..1000 {
            last = Some(architect.build("Land ho!"));
        }

        let finished = architect.take_finished();
        assert_eq!(finished.len(), MAX_PENDING_FINISHED);
        assert_eq!(finished.last().map(|done| &done.handle), last.as_ref());
        assert_eq!(finished[0].handle.id(), 1000 - MAX_PENDING_FINISHED as u64);
        assert!(!architect.has_finished());
    }

    #[test]
    fn test_instant_completes_with_zero_ticks() {
        let mut architect = architect(BuildMethod::Instant);
        let handle = architect.build("Land ho!");
        assert!(!architect.is_building());
        assert_eq!(handle.status(), RevealStatus::Completed);
        assert_fully_revealed(&architect);
        assert!(architect.has_finished());
        assert!(!architect.tick(0.016));
    }

    #[test]
    fn test_empty_build_completes_immediately() {
        for method in BuildMethod::all() {
            let mut architect = architect(*method);
            let handle = architect.build("");
            assert!(!architect.is_building());
            assert_eq!(handle.status(), RevealStatus::Completed);
            assert_eq!(architect.current_text(), "");
        }
    }

    #[test]
    fn test_build_method_change_applies_on_next_build() {
        let mut architect = architect(BuildMethod::Typewriter);
        architect.build("Parley");
        architect.set_build_method(BuildMethod::Fade);
        assert_eq!(architect.active_method(), Some(BuildMethod::Typewriter));

        architect.build("Parley");
        assert_eq!(architect.active_method(), Some(BuildMethod::Fade));
    }

    #[test]
    fn test_fade_actually_runs() {
        let mut architect = architect(BuildMethod::Fade);
        architect.build("a ");
        assert!(architect.is_building());
        assert_eq!(architect.surface().displayed_alpha(0), 0);

        architect.tick(0.016);
        assert_eq!(architect.surface().displayed_alpha(0), 4);
        assert_eq!(run_to_end(&mut architect), 62);
        assert_fully_revealed_visible_glyphs(&architect);
    }

    fn assert_fully_revealed_visible_glyphs(architect: &Architect<GlyphBuffer>) {
        let surface = architect.surface();
        for index in 0..surface.character_count() {
            if surface.is_character_visible(index) {
                assert_eq!(surface.displayed_alpha(index), ALPHA_OPAQUE);
            }
        }
    }

    #[test]
    fn test_negative_speed_still_progresses() {
        let mut architect = architect(BuildMethod::Typewriter);
        architect.set_speed(-10.0);
        assert!(architect.effective_speed() > 0.0);
        architect.build("Slow");
        assert!(architect.tick(0.35));
        assert!(architect.surface().revealed_count() > 0);
        run_to_end(&mut architect);
        assert_eq!(architect.surface().revealed_count(), 4);
    }
}
