pub mod cli;
pub mod demo_script;
pub mod reveal_settings;

pub use cli::*;
pub use demo_script::*;
pub use reveal_settings::*;
