// src/views/canvas_strip.rs
//
// The row of character canvases shown in the window.
//
// Every trajectory set gets a band: a label line, then one canvas per
// character in response order, wrapping onto new rows when the window runs
// out of width. Canvases are re-rendered from the stored session data
// whenever the session revision moves, so settings changes never refetch.
//
// Types in this module:
// CanvasBand, BandLayout, CanvasStrip

use log::debug;
use nannou::prelude::*;

use crate::config::CanvasConfig;
use crate::draw::draw_canvas;
use crate::models::Session;
use crate::render::{draw_path, CanvasRecorder};

pub const LABEL_HEIGHT: f32 = 24.0;

pub struct CanvasBand {
    pub label: String,
    pub canvases: Vec<(String, CanvasRecorder)>,
}

/// Where a band's label and canvases go, in window coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BandLayout {
    pub label: Rect,
    pub slots: Vec<Rect>,
}

pub struct CanvasStrip {
    config: CanvasConfig,
    bands: Vec<CanvasBand>,
    rendered_revision: Option<u64>,
}

impl CanvasStrip {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            bands: Vec::new(),
            rendered_revision: None,
        }
    }

    pub fn bands(&self) -> &[CanvasBand] {
        &self.bands
    }

    /// Re-render every canvas if the session changed since the last call.
    /// Returns true when a re-render happened.
    pub fn sync(&mut self, session: &Session) -> bool {
        if self.rendered_revision == Some(session.revision()) {
            return false;
        }
        self.rendered_revision = Some(session.revision());

        let config = session.render_config();
        self.bands = session
            .trajectories()
            .map(|response| {
                response
                    .sets()
                    .iter()
                    .map(|set| CanvasBand {
                        label: set.label.clone(),
                        canvases: set
                            .map
                            .iter()
                            .map(|(character, path)| {
                                let mut canvas =
                                    CanvasRecorder::new(self.config.width, self.config.height);
                                draw_path(&mut canvas, path, config);
                                (character.to_string(), canvas)
                            })
                            .collect(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        debug!(
            "Rendered {} canvases at revision {}",
            self.bands.iter().map(|b| b.canvases.len()).sum::<usize>(),
            session.revision()
        );
        true
    }

    pub fn draw(&self, draw: &Draw, area: Rect, label_color: Rgb<f32>) {
        let [r, g, b] = self.config.background;
        let background = rgb(r, g, b);

        let counts: Vec<usize> = self.bands.iter().map(|b| b.canvases.len()).collect();
        let layouts = layout(
            &counts,
            vec2(self.config.width as f32, self.config.height as f32),
            self.config.gap,
            area,
        );

        for (band, band_layout) in self.bands.iter().zip(layouts.iter()) {
            draw.text(&band.label)
                .xy(band_layout.label.xy())
                .wh(band_layout.label.wh())
                .left_justify()
                .font_size(14)
                .color(label_color);

            for ((_, canvas), slot) in band.canvases.iter().zip(band_layout.slots.iter()) {
                draw_canvas(draw, canvas, *slot, background);
            }
        }
    }
}

/// Lay out bands of `counts[i]` canvases of size `canvas` inside `area`,
/// top to bottom. Each row keeps at least one canvas even if it overflows.
pub fn layout(counts: &[usize], canvas: Vec2, gap: f32, area: Rect) -> Vec<BandLayout> {
    // offsets from the area's top-left, y growing downwards
    let mut y = gap;
    let mut layouts = Vec::with_capacity(counts.len());

    for &count in counts {
        let label = rect_at(area, gap, y, area.w() - 2.0 * gap, LABEL_HEIGHT);
        y += LABEL_HEIGHT;

        let mut x = gap;
        let mut slots = Vec::with_capacity(count);
        for _ in 0..count {
            if x + canvas.x > area.w() && x > gap {
                x = gap;
                y += canvas.y + gap;
            }
            slots.push(rect_at(area, x, y, canvas.x, canvas.y));
            x += canvas.x + gap;
        }
        if count > 0 {
            y += canvas.y + gap;
        }

        layouts.push(BandLayout { label, slots });
    }

    layouts
}

fn rect_at(area: Rect, x: f32, y: f32, w: f32, h: f32) -> Rect {
    let left = area.left() + x;
    let top = area.top() - y;
    Rect::from_x_y_w_h(left + w / 2.0, top - h / 2.0, w, h)
}
