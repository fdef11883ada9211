// src/views/status_bar.rs
//
// The input line along the bottom of the window and the alert overlay.

use nannou::prelude::*;

use crate::models::Session;

pub const STATUS_HEIGHT: f32 = 36.0;
const PADDING: f32 = 12.0;

pub fn status_line(session: &Session, loading: usize) -> String {
    let config = session.render_config();
    let mut line = format!(
        "text: {}_   scale {:.2}   width {:.1}px   gradient {}",
        session.text(),
        config.scale,
        config.stroke_width_px,
        if config.gradient_enabled { "on" } else { "off" },
    );
    if loading > 0 {
        line.push_str(&format!("   loading ({})", loading));
    }
    line
}

/// Draws the status strip at the bottom of `window` and returns the area
/// left above it.
pub fn draw_status(draw: &Draw, window: Rect, session: &Session, loading: usize) -> Rect {
    let (bar, rest) = split_bottom(window, STATUS_HEIGHT);

    draw.rect()
        .xy(bar.xy())
        .wh(bar.wh())
        .color(rgb(0.15, 0.15, 0.15));
    draw.text(&status_line(session, loading))
        .xy(bar.xy())
        .wh(bar.pad_left(PADDING).pad_right(PADDING).wh())
        .left_justify()
        .font_size(14)
        .color(rgb(0.95, 0.95, 0.95));

    rest
}

/// Covers the window while an alert is open.
pub fn draw_alert(draw: &Draw, window: Rect, message: &str) {
    draw.rect()
        .xy(window.xy())
        .wh(window.wh())
        .color(rgba(0.0, 0.0, 0.0, 0.6));

    let box_wh = vec2((window.w() * 0.6).max(320.0), 140.0);
    draw.rect()
        .xy(window.xy())
        .wh(box_wh)
        .color(rgb(0.98, 0.98, 0.98))
        .stroke(rgb(0.8, 0.1, 0.1))
        .stroke_weight(2.0);
    draw.text(message)
        .xy(window.xy() + vec2(0.0, 16.0))
        .wh(box_wh - vec2(2.0 * PADDING, 60.0))
        .font_size(16)
        .color(rgb(0.1, 0.1, 0.1));
    draw.text("Esc to dismiss")
        .xy(window.xy() - vec2(0.0, box_wh.y / 2.0 - 20.0))
        .font_size(12)
        .color(rgb(0.4, 0.4, 0.4));
}

fn split_bottom(rect: Rect, height: f32) -> (Rect, Rect) {
    let height = height.min(rect.h());
    let rest_h = rect.h() - height;
    let bar = Rect::from_x_y_w_h(rect.x(), rect.bottom() + height / 2.0, rect.w(), height);
    let rest = Rect::from_x_y_w_h(rect.x(), rect.top() - rest_h / 2.0, rect.w(), rest_h);
    (bar, rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderConfig;

    #[test]
    fn test_status_line() {
        let mut session = Session::new("山居", RenderConfig::default());
        assert_eq!(
            status_line(&session, 0),
            "text: 山居_   scale 0.10   width 1.0px   gradient off"
        );

        session.toggle_gradient();
        assert!(status_line(&session, 2).ends_with("gradient on   loading (2)"));
    }

    #[test]
    fn test_split_bottom() {
        let window = Rect::from_w_h(1280.0, 720.0);
        let (bar, rest) = split_bottom(window, STATUS_HEIGHT);

        assert_eq!(bar.bottom(), -360.0);
        assert_eq!(bar.h(), STATUS_HEIGHT);
        assert_eq!(rest.top(), 360.0);
        assert_eq!(rest.bottom(), bar.top());
    }
}
