/// src/render/path_renderer.rs
/// GlyphPath translation to DrawingSurface calls

use log::trace;

use super::gradient::segment_color;
use super::{CanvasTransform, DrawingSurface, RenderConfig};
use crate::models::{GlyphPath, Point, Segment};

/// Clear `surface` and draw `path` on it in device space.
///
/// Without the gradient the whole path is accumulated and stroked once in the
/// flat colour. With it, every segment is stroked on its own in its hue and the
/// path restarts at the segment's endpoint.
pub fn draw_path<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    path: &GlyphPath,
    config: &RenderConfig,
) {
    surface.clear();
    surface.save();
    surface.set_transform(CanvasTransform::glyph_to_device(config.anchor, config.scale));
    // the transform scales strokes too, undo that so the width stays in pixels
    surface.set_line_width(config.stroke_width_px / config.scale);
    surface.begin_path();

    if config.gradient_enabled {
        stroke_per_segment(surface, path);
    } else {
        surface.set_stroke_color(config.stroke_color);
        for segment in path.segments() {
            trace_segment(surface, segment);
        }
        surface.stroke();
    }

    surface.restore();
}

fn trace_segment<S: DrawingSurface + ?Sized>(surface: &mut S, segment: &Segment) {
    match segment {
        Segment::Move(p) => surface.move_to(p.to_pt2()),
        Segment::Line(p) => surface.line_to(p.to_pt2()),
        Segment::Curve(c1, c2, p) => surface.bezier_curve_to(c1.to_pt2(), c2.to_pt2(), p.to_pt2()),
        Segment::Close => surface.close_path(),
        Segment::Unknown { tag } => trace!("skipping segment with tag '{}'", tag),
    }
}

/// Stroke every segment on its own, coloured by its index on the hue wheel.
///
/// Each stroke restarts the path at the previous endpoint, so the subpath start
/// is lost. A `Close` therefore never emits `close_path` here. It strokes an
/// explicit `line_to` back to the contour's last Move point instead, and only
/// falls back to `close_path` when no Move came before it. The closing edge is
/// an open line in its own hue, so it gets round caps instead of a join.
fn stroke_per_segment<S: DrawingSurface + ?Sized>(surface: &mut S, path: &GlyphPath) {
    // unknown segments still take a slot on the hue wheel
    let count = path.len();
    let mut contour_start: Option<Point> = None;

    for (index, segment) in path.segments().iter().enumerate() {
        match segment {
            Segment::Unknown { tag } => {
                trace!("skipping segment {} with tag '{}'", index, tag);
            }
            Segment::Close => {
                surface.set_stroke_color(segment_color(index, count));
                match contour_start {
                    Some(start) => surface.line_to(start.to_pt2()),
                    None => surface.close_path(),
                }
                surface.stroke();
                surface.begin_path();
            }
            _ => {
                if let Segment::Move(p) = segment {
                    contour_start = Some(*p);
                }
                surface.set_stroke_color(segment_color(index, count));
                trace_segment(surface, segment);
                surface.stroke();
                surface.begin_path();
                if let Some(end) = segment.end_point() {
                    surface.move_to(end.to_pt2());
                }
            }
        }
    }
}
