// src/render/mod.rs
// Glyph path rendering onto canvas-like drawing surfaces

pub mod canvas_recorder;
pub mod canvas_transform;
pub mod gradient;
pub mod path_renderer;

pub use canvas_recorder::{CanvasRecorder, DevicePathOp, DrawOp, StrokeCommand};
pub use canvas_transform::CanvasTransform;
pub use path_renderer::draw_path;

use nannou::prelude::*;

/// Where glyph-space (0, 0) lands on a canvas, in device pixels from the top-left.
pub const DEFAULT_ANCHOR: (f32, f32) = (20.0, 180.0);

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub scale: f32,
    /// Stroke width in device pixels, independent of `scale`.
    pub stroke_width_px: f32,
    pub gradient_enabled: bool,
    /// Used when the gradient is off.
    pub stroke_color: Rgb<f32>,
    pub anchor: Vec2,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 0.1,
            stroke_width_px: 1.0,
            gradient_enabled: false,
            stroke_color: rgb(0.0, 0.0, 0.0),
            anchor: vec2(DEFAULT_ANCHOR.0, DEFAULT_ANCHOR.1),
        }
    }
}

/// The subset of a 2D canvas context the path renderer needs.
///
/// Path coordinates are given in the user space of the current transform,
/// the line width is scaled by the transform in effect when `stroke` is called.
pub trait DrawingSurface {
    fn clear(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    fn set_transform(&mut self, transform: CanvasTransform);
    fn set_line_width(&mut self, width: f32);
    fn set_stroke_color(&mut self, color: Rgb<f32>);
    fn begin_path(&mut self);
    fn move_to(&mut self, to: Point2);
    fn line_to(&mut self, to: Point2);
    fn bezier_curve_to(&mut self, ctrl1: Point2, ctrl2: Point2, to: Point2);
    fn close_path(&mut self);
    fn stroke(&mut self);
}
