// src/render/canvas_recorder.rs
//
// An in-memory canvas. It follows 2D canvas context semantics for the calls in
// `DrawingSurface`, records every call as a DrawOp and resolves each stroke into a
// device-space StrokeCommand that can later be replayed onto nannou or SVG.
//
// Types in this module:
// DrawOp, DevicePathOp, StrokeCommand, CanvasRecorder

use nannou::prelude::*;

use super::{CanvasTransform, DrawingSurface};

/// A single call made against the surface, in the caller's coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Save,
    Restore,
    SetTransform(CanvasTransform),
    SetLineWidth(f32),
    SetStrokeColor(Rgb<f32>),
    BeginPath,
    MoveTo(Point2),
    LineTo(Point2),
    BezierCurveTo(Point2, Point2, Point2),
    ClosePath,
    Stroke,
}

/// A path command after the current transform has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DevicePathOp {
    MoveTo(Point2),
    LineTo(Point2),
    CubicTo(Point2, Point2, Point2),
    Close,
}

impl DevicePathOp {
    fn draws(&self) -> bool {
        !matches!(self, DevicePathOp::MoveTo(_))
    }
}

/// One stroked path in device space.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeCommand {
    pub ops: Vec<DevicePathOp>,
    pub color: Rgb<f32>,
    /// Width in device pixels.
    pub width: f32,
}

#[derive(Debug, Clone, Copy)]
struct CanvasState {
    transform: CanvasTransform,
    line_width: f32,
    stroke_color: Rgb<f32>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            transform: CanvasTransform::default(),
            line_width: 1.0,
            stroke_color: rgb(0.0, 0.0, 0.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CanvasRecorder {
    width: u32,
    height: u32,

    state: CanvasState,
    saved: Vec<CanvasState>,

    // current path, device space
    path: Vec<DevicePathOp>,
    subpath_start: Option<Point2>,
    current_point: Option<Point2>,
    // set after close_path: the next segment must reopen at the subpath start
    reopen_at: Option<Point2>,

    ops: Vec<DrawOp>,
    strokes: Vec<StrokeCommand>,
}

impl CanvasRecorder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: CanvasState::default(),
            saved: Vec::new(),
            path: Vec::new(),
            subpath_start: None,
            current_point: None,
            reopen_at: None,
            ops: Vec::new(),
            strokes: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn strokes(&self) -> &[StrokeCommand] {
        &self.strokes
    }

    /// Number of `stroke` calls since the last clear, including ones that
    /// painted nothing.
    pub fn stroke_calls(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::Stroke).count()
    }

    pub fn is_blank(&self) -> bool {
        self.strokes.is_empty()
    }

    fn to_device(&self, point: Point2) -> Point2 {
        self.state.transform.apply_to_point(point)
    }

    // Canvas semantics: drawing with no current point first starts a subpath
    fn ensure_subpath(&mut self, at: Point2) {
        if let Some(start) = self.reopen_at.take() {
            self.path.push(DevicePathOp::MoveTo(start));
            self.subpath_start = Some(start);
            self.current_point = Some(start);
        } else if self.current_point.is_none() {
            self.path.push(DevicePathOp::MoveTo(at));
            self.subpath_start = Some(at);
            self.current_point = Some(at);
        }
    }
}

impl DrawingSurface for CanvasRecorder {
    fn clear(&mut self) {
        self.ops.clear();
        self.strokes.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn set_transform(&mut self, transform: CanvasTransform) {
        self.ops.push(DrawOp::SetTransform(transform));
        self.state.transform = transform;
    }

    fn set_line_width(&mut self, width: f32) {
        self.ops.push(DrawOp::SetLineWidth(width));
        // canvas ignores non-finite and non-positive widths
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn set_stroke_color(&mut self, color: Rgb<f32>) {
        self.ops.push(DrawOp::SetStrokeColor(color));
        self.state.stroke_color = color;
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
        self.path.clear();
        self.subpath_start = None;
        self.current_point = None;
        self.reopen_at = None;
    }

    fn move_to(&mut self, to: Point2) {
        self.ops.push(DrawOp::MoveTo(to));
        let device = self.to_device(to);
        self.reopen_at = None;
        self.path.push(DevicePathOp::MoveTo(device));
        self.subpath_start = Some(device);
        self.current_point = Some(device);
    }

    fn line_to(&mut self, to: Point2) {
        self.ops.push(DrawOp::LineTo(to));
        let device = self.to_device(to);
        if self.current_point.is_none() && self.reopen_at.is_none() {
            // lineTo without a current point behaves as moveTo
            self.path.push(DevicePathOp::MoveTo(device));
            self.subpath_start = Some(device);
        } else {
            self.ensure_subpath(device);
            self.path.push(DevicePathOp::LineTo(device));
        }
        self.current_point = Some(device);
    }

    fn bezier_curve_to(&mut self, ctrl1: Point2, ctrl2: Point2, to: Point2) {
        self.ops.push(DrawOp::BezierCurveTo(ctrl1, ctrl2, to));
        let (c1, c2, end) = (
            self.to_device(ctrl1),
            self.to_device(ctrl2),
            self.to_device(to),
        );
        self.ensure_subpath(c1);
        self.path.push(DevicePathOp::CubicTo(c1, c2, end));
        self.current_point = Some(end);
    }

    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
        if self.current_point.is_none() {
            return;
        }
        self.path.push(DevicePathOp::Close);
        self.current_point = self.subpath_start;
        self.reopen_at = self.subpath_start;
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke);
        if !self.path.iter().any(DevicePathOp::draws) {
            return;
        }
        self.strokes.push(StrokeCommand {
            ops: self.path.clone(),
            color: self.state.stroke_color,
            width: self.state.line_width * self.state.transform.stroke_scale(),
        });
    }
}
