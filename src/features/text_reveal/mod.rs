//! Text reveal engine.
//!
//! Decides, frame by frame, which characters of a string are visible and at what
//! opacity. Rendering, layout and input live with the host; the engine only talks to
//! the widget through [`RevealSurface`].

pub mod architect;
pub mod fade;
pub mod instant;
pub mod speed;
pub mod strategy;
pub mod surface;
pub mod typewriter;

pub use architect::{Architect, RevealFinished, RevealHandle, RevealStatus};
pub use speed::{SpeedModel, StepRate};
pub use strategy::{BuildMethod, Pacing, RevealStrategy, RevealTexts, StepOutcome};
pub use surface::{Glyph, GlyphBuffer, RevealSurface, Rgba8, ALPHA_OPAQUE};
