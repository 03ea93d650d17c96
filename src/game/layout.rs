//! Window-relative placement of the map, ground and finish line

use macroquad::prelude::{vec2, Vec2};

use super::geometry::Rect;

/// The map spans this multiple of the window in both directions
pub const MAP_SCALE: f32 = 1.5;
const GROUND_HEIGHT_FRACTION: f32 = 0.2;
const MIN_GROUND_HEIGHT: f32 = 60.0;
const MAX_GROUND_HEIGHT_FRACTION: f32 = 0.3;
/// Finish line texture repeats this many times horizontally
pub const FINISH_LINE_TILES: f32 = 7.0;
pub const FALLBACK_FINISH_LINE_SIZE: Vec2 = Vec2::new(200.0, 50.0);
/// Gap between the player's feet and the ground at spawn
const PLAYER_DROP_HEIGHT: f32 = 50.0;

pub fn ground_height(window_height: f32) -> f32 {
    let preferred = window_height * GROUND_HEIGHT_FRACTION;
    let max = window_height * MAX_GROUND_HEIGHT_FRACTION;
    // Tiny windows would make min > max; clamp() panics on that
    preferred.max(MIN_GROUND_HEIGHT).min(max)
}

/// Finish line size for an optional texture size
pub fn finish_line_size(texture_size: Option<Vec2>) -> Vec2 {
    match texture_size {
        Some(size) => vec2(size.x * FINISH_LINE_TILES, size.y),
        None => FALLBACK_FINISH_LINE_SIZE,
    }
}

/// World rectangles derived from the window size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub window: Vec2,
    pub map_size: Vec2,
    pub ground: Rect,
    pub finish_line: Rect,
}

impl Layout {
    /// None for a degenerate (non-positive) window
    pub fn compute(window: Vec2, finish_line_size: Vec2) -> Option<Self> {
        if window.x <= 0.0 || window.y <= 0.0 {
            return None;
        }
        let map_size = window * MAP_SCALE;
        let ground_h = ground_height(window.y);
        let ground_y = window.y - ground_h;
        let ground = Rect::new((window.x - map_size.x) / 2.0, ground_y, map_size.x, ground_h);
        let finish_line = Rect::new(
            window.x / 2.0 - finish_line_size.x / 2.0,
            ground_y - finish_line_size.y,
            finish_line_size.x,
            finish_line_size.y,
        );
        Some(Self { window, map_size, ground, finish_line })
    }

    /// Spawn point for a player of base radius `radius`
    pub fn player_start(&self, radius: f32) -> Vec2 {
        vec2(self.window.x / 2.0, self.ground.y - radius - PLAYER_DROP_HEIGHT)
    }

    /// Horizontal center of the finish line, the enemies' goal
    pub fn finish_line_x(&self) -> f32 {
        self.finish_line.center().x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_height_clamped() {
        assert_eq!(ground_height(480.0), 96.0);
        // 0.2 * 250 = 50 is below the minimum of 60
        assert_eq!(ground_height(250.0), 60.0);
        // The 30% cap wins over the minimum on very short windows
        assert_eq!(ground_height(100.0), 30.0);
    }

    #[test]
    fn test_default_window_layout() {
        let layout = Layout::compute(vec2(854.0, 480.0), FALLBACK_FINISH_LINE_SIZE).unwrap();
        assert_eq!(layout.map_size, vec2(1281.0, 720.0));
        assert_eq!(layout.ground, Rect::new(-213.5, 384.0, 1281.0, 96.0));
        assert_eq!(layout.finish_line, Rect::new(327.0, 334.0, 200.0, 50.0));
        assert_eq!(layout.finish_line_x(), 427.0);
        assert_eq!(layout.player_start(16.0), vec2(427.0, 318.0));
    }

    #[test]
    fn test_textured_finish_line_size() {
        assert_eq!(finish_line_size(Some(vec2(16.0, 16.0))), vec2(112.0, 16.0));
        assert_eq!(finish_line_size(None), vec2(200.0, 50.0));
    }

    #[test]
    fn test_degenerate_window() {
        assert!(Layout::compute(vec2(0.0, 480.0), FALLBACK_FINISH_LINE_SIZE).is_none());
        assert!(Layout::compute(vec2(854.0, -1.0), FALLBACK_FINISH_LINE_SIZE).is_none());
    }
}
