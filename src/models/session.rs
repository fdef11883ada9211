// src/models/session.rs
//
// Everything the viewer remembers between frames: the text being typed, the
// render settings, the last trajectories fetched and an error waiting to be
// acknowledged. The revision counter moves whenever something that affects the
// canvases changes, so views can tell when to redraw.

use log::{debug, info, warn};

use super::TrajectoryResponse;
use crate::render::RenderConfig;

#[derive(Debug, Clone)]
pub struct Session {
    text: String,
    render: RenderConfig,
    trajectories: Option<TrajectoryResponse>,
    alert: Option<String>,
    revision: u64,
}

impl Session {
    pub fn new(text: impl Into<String>, render: RenderConfig) -> Self {
        Self {
            text: text.into(),
            render,
            trajectories: None,
            alert: None,
            revision: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn pop_char(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    pub fn trajectories(&self) -> Option<&TrajectoryResponse> {
        self.trajectories.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Swap in a new response. The old one is dropped, never merged.
    pub fn replace_trajectories(&mut self, response: TrajectoryResponse) {
        info!(
            "Loaded {} canvas(es) in {} set(s)",
            response.canvas_count(),
            response.sets().len()
        );
        for set in response.sets() {
            debug!("{}: {}", set.label, set.map.characters().concat());
        }
        self.trajectories = Some(response);
        self.bump();
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn has_alert(&self) -> bool {
        self.alert.is_some()
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("Error: {}", message);
        self.alert = Some(message);
    }

    pub fn dismiss_alert(&mut self) -> bool {
        self.alert.take().is_some()
    }

    pub fn set_scale(&mut self, scale: f32) -> bool {
        if !is_positive(scale) {
            warn!("Ignoring scale {}, it must be positive", scale);
            return false;
        }
        self.render.scale = scale;
        self.bump();
        true
    }

    pub fn set_stroke_width(&mut self, width: f32) -> bool {
        if !is_positive(width) {
            warn!("Ignoring stroke width {}, it must be positive", width);
            return false;
        }
        self.render.stroke_width_px = width;
        self.bump();
        true
    }

    pub fn set_gradient(&mut self, enabled: bool) {
        if self.render.gradient_enabled != enabled {
            self.render.gradient_enabled = enabled;
            self.bump();
        }
    }

    pub fn toggle_gradient(&mut self) {
        self.set_gradient(!self.render.gradient_enabled);
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
