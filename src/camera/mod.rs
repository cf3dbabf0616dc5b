pub mod controller;
pub mod input;
pub mod state;

pub use controller::CameraController;
pub use input::{Direction, HeldKeys, InputEvent};
pub use state::CameraState;
