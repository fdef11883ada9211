// src/views/mod.rs

pub mod canvas_strip;
pub mod status_bar;

pub use canvas_strip::{CanvasBand, CanvasStrip};
pub use status_bar::{draw_alert, draw_status};
