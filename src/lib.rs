pub mod app;
pub mod camera;
pub mod error;
pub mod frame_timing;
pub mod settings;

/// Application name used for the confy config directory.
pub const CONFY_APP_NAME: &str = "learngl-rs";
