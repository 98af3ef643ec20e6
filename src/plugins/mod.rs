pub mod text_reveal;
pub mod input;
pub mod debug_ui;
pub mod demo;
