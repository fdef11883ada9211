use nannou::prelude::*;

/// Axis-aligned affine transform: scale then translate.
///
/// Glyph space is y-up, device space is y-down, so the glyph transform
/// carries a negative y scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    pub translation: Vec2,
    pub scale: Vec2,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }
}

impl CanvasTransform {
    pub fn glyph_to_device(anchor: Vec2, scale: f32) -> Self {
        Self {
            translation: anchor,
            scale: vec2(scale, -scale),
        }
    }

    pub fn apply_to_point(&self, point: Point2) -> Point2 {
        point * self.scale + self.translation
    }

    /// Factor applied to line widths stroked under this transform.
    pub fn stroke_scale(&self) -> f32 {
        (self.scale.x * self.scale.y).abs().sqrt()
    }
}
