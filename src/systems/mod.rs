pub mod text_reveal;
