// src/controllers/osc.rs
// OSC Controller
//
// Remote control over UDP. Every address maps onto a ControlCommand, so a
// remote surface can drive the viewer exactly like the keyboard does.
//
//   /text s            replace the input text
//   /visualize         fetch trajectories for the current text
//   /stroke_width f    stroke width in pixels
//   /scale f           glyph scale
//   /gradient i        1 = per-segment gradient, 0 = flat colour
//   /toggle_gradient
//   /dismiss           acknowledge the open alert
//   /export            write the canvases out as SVG

use log::warn;
use nannou_osc as osc;
use std::error::Error;

use super::ControlCommand;

pub struct OscController {
    command_queue: Vec<ControlCommand>,
    receiver: osc::Receiver,
}

impl OscController {
    pub fn new(port: u16) -> Result<Self, Box<dyn Error>> {
        let receiver = osc::receiver(port)?;

        Ok(Self {
            command_queue: Vec::new(),
            receiver,
        })
    }

    pub fn process_messages(&mut self) {
        for (packet, _addr) in self.receiver.try_iter() {
            for message in packet.into_msgs() {
                match parse_message(&message.addr, &message.args) {
                    Some(command) => self.command_queue.push(command),
                    None => warn!(
                        "Dropping OSC message {} with args {:?}",
                        message.addr, message.args
                    ),
                }
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<ControlCommand> {
        std::mem::take(&mut self.command_queue)
    }
}

pub fn parse_message(addr: &str, args: &[osc::Type]) -> Option<ControlCommand> {
    match (addr, args) {
        ("/text", [osc::Type::String(text)]) => Some(ControlCommand::SetText(text.clone())),
        ("/visualize", []) => Some(ControlCommand::Visualize),
        ("/stroke_width", [value]) => number(value).map(ControlCommand::SetStrokeWidth),
        ("/scale", [value]) => number(value).map(ControlCommand::SetScale),
        ("/gradient", [value]) => flag(value).map(ControlCommand::SetGradient),
        ("/toggle_gradient", []) => Some(ControlCommand::ToggleGradient),
        ("/dismiss", []) => Some(ControlCommand::DismissAlert),
        ("/export", []) => Some(ControlCommand::ExportSvg),
        _ => None,
    }
}

fn number(value: &osc::Type) -> Option<f32> {
    match value {
        osc::Type::Float(f) => Some(*f),
        osc::Type::Double(d) => Some(*d as f32),
        osc::Type::Int(i) => Some(*i as f32),
        _ => None,
    }
}

fn flag(value: &osc::Type) -> Option<bool> {
    match value {
        osc::Type::Bool(b) => Some(*b),
        osc::Type::Int(i) => Some(*i != 0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text() {
        let args = [osc::Type::String("山居".to_string())];
        assert_eq!(
            parse_message("/text", &args),
            Some(ControlCommand::SetText("山居".to_string()))
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            parse_message("/scale", &[osc::Type::Float(0.25)]),
            Some(ControlCommand::SetScale(0.25))
        );
        assert_eq!(
            parse_message("/stroke_width", &[osc::Type::Int(3)]),
            Some(ControlCommand::SetStrokeWidth(3.0))
        );
    }

    #[test]
    fn test_gradient_flag() {
        assert_eq!(
            parse_message("/gradient", &[osc::Type::Int(1)]),
            Some(ControlCommand::SetGradient(true))
        );
        assert_eq!(
            parse_message("/gradient", &[osc::Type::Bool(false)]),
            Some(ControlCommand::SetGradient(false))
        );
    }

    #[test]
    fn test_malformed() {
        assert_eq!(parse_message("/scale", &[]), None);
        assert_eq!(
            parse_message("/scale", &[osc::Type::String("big".to_string())]),
            None
        );
        assert_eq!(parse_message("/visualize", &[osc::Type::Int(1)]), None);
        assert_eq!(parse_message("/grid/create", &[]), None);
    }
}
