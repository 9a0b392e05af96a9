pub mod scale;
pub mod settings;
