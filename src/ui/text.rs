//! Text measuring and placement helpers
//!
//! macroquad draws text from its baseline; menus are laid out from the top
//! edge, so everything here takes a top-left position.

use macroquad::prelude::*;

pub fn text_width(text: &str, font_size: u16) -> f32 {
    measure_text(text, None, font_size, 1.0).width
}

/// Draw `text` with its top edge at `y`
pub fn draw_text_top(text: &str, x: f32, y: f32, font_size: u16, color: Color) {
    let dims = measure_text(text, None, font_size, 1.0);
    draw_text(text, x.round(), (y + dims.offset_y).round(), font_size as f32, color);
}

/// Draw `text` horizontally centered on `center_x`
pub fn draw_text_centered(text: &str, center_x: f32, y: f32, font_size: u16, color: Color) {
    let width = text_width(text, font_size);
    draw_text_top(text, center_x - width / 2.0, y, font_size, color);
}

/// Scale `font_size` down so a line measuring `width` fits in `available`
pub fn shrink_to_fit(font_size: u16, width: f32, available: f32) -> u16 {
    if width > available && width > 0.0 && available > 0.0 {
        ((font_size as f32 * available / width) as u16).max(1)
    } else {
        font_size
    }
}

/// Responsive font size: `extent / divisor` clamped into `[min, max]`
pub fn responsive_size(extent: f32, divisor: f32, min: u16, max: u16) -> u16 {
    ((extent / divisor) as u16).clamp(min, max)
}

/// Largest size not above `font_size` at which `text` fits in `available`
pub fn fitted_size(text: &str, font_size: u16, available: f32) -> u16 {
    shrink_to_fit(font_size, text_width(text, font_size), available)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shrink_to_fit() {
        assert_eq!(shrink_to_fit(40, 100.0, 300.0), 40);
        assert_eq!(shrink_to_fit(40, 400.0, 200.0), 20);
        assert_eq!(shrink_to_fit(40, 10_000.0, 1.0), 1);
        assert_eq!(shrink_to_fit(40, 400.0, 0.0), 40);
    }

    #[test]
    fn test_responsive_size() {
        assert_eq!(responsive_size(854.0, 15.0, 24, 80), 56);
        assert_eq!(responsive_size(200.0, 15.0, 24, 80), 24);
        assert_eq!(responsive_size(4000.0, 15.0, 24, 80), 80);
    }
}
