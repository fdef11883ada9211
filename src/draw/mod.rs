// src/draw/mod.rs
// Replaying recorded canvases onto Nannou Draw

pub mod canvas_draw;

pub use canvas_draw::{device_to_slot, draw_canvas};
