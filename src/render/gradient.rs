// src/render/gradient.rs
//
// Per-segment stroke colours: the hue walks once around the wheel over the
// length of a path, at full saturation and half lightness.

use nannou::prelude::*;

const SATURATION: f32 = 1.0;
const LIGHTNESS: f32 = 0.5;

/// Hue in degrees for segment `index` of a path with `count` segments.
pub fn segment_hue(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    index as f32 / count as f32 * 360.0
}

pub fn segment_color(index: usize, count: usize) -> Rgb<f32> {
    let hue = segment_hue(index, count) / 360.0;
    Rgb::from(hsl(hue, SATURATION, LIGHTNESS))
}
