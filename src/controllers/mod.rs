pub mod control;
pub mod keyboard;
pub mod osc;

pub use control::{apply_command, ControlAction, ControlCommand};
pub use keyboard::{char_command, key_command, KeyboardSteps};
pub use osc::OscController;
