// src/controllers/keyboard.rs
//
// Window keyboard input to ControlCommands

use nannou::prelude::*;

use super::ControlCommand;

/// Step sizes for the arrow-key nudges.
#[derive(Debug, Clone, Copy)]
pub struct KeyboardSteps {
    pub scale: f32,
    pub stroke_width: f32,
}

pub fn key_command(key: Key, steps: KeyboardSteps) -> Option<ControlCommand> {
    match key {
        Key::Return | Key::NumpadEnter => Some(ControlCommand::Visualize),
        Key::Back => Some(ControlCommand::Backspace),
        Key::Up => Some(ControlCommand::NudgeScale(steps.scale)),
        Key::Down => Some(ControlCommand::NudgeScale(-steps.scale)),
        Key::Right => Some(ControlCommand::NudgeStrokeWidth(steps.stroke_width)),
        Key::Left => Some(ControlCommand::NudgeStrokeWidth(-steps.stroke_width)),
        Key::Tab => Some(ControlCommand::ToggleGradient),
        Key::Escape => Some(ControlCommand::DismissAlert),
        Key::F5 => Some(ControlCommand::ExportSvg),
        _ => None,
    }
}

/// Typed text. Control characters arrive here too and are handled by
/// `key_command` instead.
pub fn char_command(c: char) -> Option<ControlCommand> {
    if c.is_control() {
        None
    } else {
        Some(ControlCommand::AppendChar(c))
    }
}
