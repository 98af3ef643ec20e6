pub mod dialogue_text;

pub use dialogue_text::*;
