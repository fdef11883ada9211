/// src/draw/canvas_draw.rs
/// Replays a CanvasRecorder's strokes onto Nannou Draw

use nannou::prelude::*;

use crate::render::{CanvasRecorder, DevicePathOp, StrokeCommand};

/// Draw `canvas` into `slot`. Device (0, 0) is the slot's top-left corner and
/// device y grows downwards. Anything outside the slot is clipped.
pub fn draw_canvas(draw: &Draw, canvas: &CanvasRecorder, slot: Rect, background: Rgb<f32>) {
    draw.rect()
        .xy(slot.xy())
        .wh(slot.wh())
        .color(background);

    let clipped = draw.scissor(slot);
    for stroke in canvas.strokes() {
        draw_stroke(&clipped, stroke, slot);
    }
}

fn draw_stroke(draw: &Draw, stroke: &StrokeCommand, slot: Rect) {
    let path = build_path(&stroke.ops, slot);

    draw.path()
        .stroke()
        .weight(stroke.width)
        .caps_round()
        .join_round()
        .color(stroke.color)
        .events(path.iter());
}

// lyon wants every subpath ended before the next begin and before build.
// Canvas paths only end implicitly, so the open/closed state is tracked here.
fn build_path(ops: &[DevicePathOp], slot: Rect) -> nannou::geom::Path {
    let mut builder = nannou::geom::Path::builder();
    let mut open = false;
    let mut subpath_start: Option<Point2> = None;
    let mut current: Option<Point2> = None;

    for op in ops {
        match *op {
            DevicePathOp::MoveTo(to) => {
                if open {
                    builder.inner_mut().end(false);
                }
                builder = builder.begin(device_to_slot(to, slot));
                open = true;
                subpath_start = Some(to);
                current = Some(to);
            }
            DevicePathOp::LineTo(to) => {
                if !open {
                    let at = current.unwrap_or(to);
                    builder = builder.begin(device_to_slot(at, slot));
                    open = true;
                    subpath_start = Some(at);
                }
                builder = builder.line_to(device_to_slot(to, slot));
                current = Some(to);
            }
            DevicePathOp::CubicTo(c1, c2, to) => {
                if !open {
                    let at = current.unwrap_or(c1);
                    builder = builder.begin(device_to_slot(at, slot));
                    open = true;
                    subpath_start = Some(at);
                }
                builder = builder.cubic_bezier_to(
                    device_to_slot(c1, slot),
                    device_to_slot(c2, slot),
                    device_to_slot(to, slot),
                );
                current = Some(to);
            }
            DevicePathOp::Close => {
                if open {
                    builder = builder.close();
                    open = false;
                    current = subpath_start;
                }
            }
        }
    }

    if open {
        builder.inner_mut().end(false);
    }
    builder.build()
}

pub fn device_to_slot(point: Point2, slot: Rect) -> Point2 {
    pt2(slot.left() + point.x, slot.top() - point.y)
}
