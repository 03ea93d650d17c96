//! Basic menu widgets

use macroquad::prelude::*;

use super::text::{draw_text_top, text_width};
use super::theme::{BUTTON_IDLE, BUTTON_ROUNDNESS, BUTTON_SELECTED, BUTTON_TEXT_SCALE};

/// Label colors for a button in its idle and selected states
#[derive(Debug, Clone, Copy)]
pub struct ButtonStyle {
    pub text: Color,
    pub selected_text: Color,
}

impl ButtonStyle {
    pub const PLAIN: ButtonStyle = ButtonStyle { text: WHITE, selected_text: WHITE };
    /// Dark label on the highlighted button
    pub const CONTRAST: ButtonStyle = ButtonStyle { text: WHITE, selected_text: BLACK };
}

/// Darken the whole window
pub fn draw_overlay(width: f32, height: f32, alpha: f32) {
    draw_rectangle(0.0, 0.0, width, height, Color { a: alpha, ..BLACK });
}

/// Draw a selectable menu button with a centered label
pub fn button(rect: Rect, label: &str, selected: bool, style: ButtonStyle) {
    let fill = if selected { BUTTON_SELECTED } else { BUTTON_IDLE };
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, rect.h * BUTTON_ROUNDNESS, fill);

    let font_size = (rect.h * BUTTON_TEXT_SCALE) as u16;
    let width = text_width(label, font_size);
    let text_color = if selected { style.selected_text } else { style.text };
    draw_text_top(
        label,
        rect.x + (rect.w - width) / 2.0,
        rect.y + (rect.h - font_size as f32) / 2.0,
        font_size,
        text_color,
    );
}

/// Small square button with a single-character label ("<" / ">")
pub fn arrow_button(rect: Rect, glyph: &str, highlighted: bool) {
    let fill = if highlighted { BUTTON_SELECTED } else { BUTTON_IDLE };
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, rect.h * BUTTON_ROUNDNESS, fill);
    let font_size = (rect.h * BUTTON_TEXT_SCALE) as u16;
    let width = text_width(glyph, font_size);
    draw_text_top(
        glyph,
        rect.x + (rect.w - width) / 2.0,
        rect.y + (rect.h - font_size as f32) / 2.0,
        font_size,
        if highlighted { BLACK } else { WHITE },
    );
}

/// Draw a rounded rectangle (simple approximation using overlapping rects)
pub fn draw_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
    // Main body
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, w, h - r * 2.0, color);
    // Corners (circles)
    draw_circle(x + r, y + r, r, color);
    draw_circle(x + w - r, y + r, r, color);
    draw_circle(x + r, y + h - r, r, color);
    draw_circle(x + w - r, y + h - r, r, color);
}

/// Vertical stack of equally sized buttons centered on `center_x`
pub fn button_column(center_x: f32, top: f32, width: f32, height: f32, spacing: f32, count: usize) -> Vec<Rect> {
    (0..count)
        .map(|i| Rect::new(center_x - width / 2.0, top + i as f32 * (height + spacing), width, height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_column_spacing() {
        let rects = button_column(400.0, 100.0, 200.0, 40.0, 10.0, 3);
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0], Rect::new(300.0, 100.0, 200.0, 40.0));
        assert_eq!(rects[2].y, 200.0);
    }
}
