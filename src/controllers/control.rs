// src/controllers/control.rs
//
// ControlCommand is the one vocabulary shared by the keyboard and OSC.
// Applying a command edits the Session and tells the caller if there is
// outside work to start (a fetch or an export).

use log::{debug, info};

use crate::models::Session;

#[derive(Debug, Clone, PartialEq)]
pub enum ControlCommand {
    SetText(String),
    AppendChar(char),
    Backspace,
    Visualize,
    SetStrokeWidth(f32),
    NudgeStrokeWidth(f32),
    SetScale(f32),
    NudgeScale(f32),
    SetGradient(bool),
    ToggleGradient,
    DismissAlert,
    ExportSvg,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlAction {
    None,
    Fetch(String),
    Export,
}

pub fn apply_command(session: &mut Session, command: ControlCommand) -> ControlAction {
    // an open alert swallows everything until it is acknowledged
    if session.has_alert() && command != ControlCommand::DismissAlert {
        debug!("Alert open, ignoring {:?}", command);
        return ControlAction::None;
    }

    match command {
        ControlCommand::SetText(text) => session.set_text(text),
        ControlCommand::AppendChar(c) => session.push_char(c),
        ControlCommand::Backspace => {
            session.pop_char();
        }
        ControlCommand::Visualize => {
            info!("Requesting trajectories for \"{}\"", session.text());
            return ControlAction::Fetch(session.text().to_string());
        }
        ControlCommand::SetStrokeWidth(width) => {
            session.set_stroke_width(width);
        }
        ControlCommand::NudgeStrokeWidth(delta) => {
            let width = session.render_config().stroke_width_px + delta;
            session.set_stroke_width(width);
        }
        ControlCommand::SetScale(scale) => {
            session.set_scale(scale);
        }
        ControlCommand::NudgeScale(delta) => {
            let scale = session.render_config().scale + delta;
            session.set_scale(scale);
        }
        ControlCommand::SetGradient(enabled) => session.set_gradient(enabled),
        ControlCommand::ToggleGradient => session.toggle_gradient(),
        ControlCommand::DismissAlert => {
            session.dismiss_alert();
        }
        ControlCommand::ExportSvg => return ControlAction::Export,
    }
    ControlAction::None
}
