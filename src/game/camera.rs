//! Side-scrolling camera that eases toward the player

use macroquad::prelude::{vec2, Camera2D, Vec2};

use super::geometry::{lerp, Rect};

/// Fraction of the remaining distance covered per frame
const FOLLOW_FACTOR: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// World point shown at `offset`
    pub target: Vec2,
    /// Screen point the target maps to (window center)
    pub offset: Vec2,
    window: Vec2,
}

impl CameraRig {
    pub fn new(window: Vec2) -> Self {
        let offset = window / 2.0;
        Self { target: offset, offset, window }
    }

    pub fn resize(&mut self, window: Vec2) {
        self.window = window;
        self.offset = window / 2.0;
    }

    /// Vertical target keeps the window bottom on the world's bottom edge
    fn target_y(&self) -> f32 {
        self.window.y - self.offset.y
    }

    /// Ease toward `player_x`, keeping the view over `ground` when it is
    /// at least as wide as the window.
    pub fn follow(&mut self, player_x: f32, ground: Rect) {
        let half_width = self.window.x / 2.0;
        let mut target_x = player_x;
        if ground.w >= self.window.x {
            target_x = target_x.clamp(ground.x + half_width, ground.right() - half_width);
        }
        self.target.x = lerp(self.target.x, target_x, FOLLOW_FACTOR);
        self.target.y = self.target_y();
    }

    /// Jump straight to `x` without easing
    pub fn snap_to(&mut self, x: f32) {
        self.target = vec2(x, self.target_y());
    }

    /// Screen-space to world-space transform for drawing
    pub fn to_camera2d(&self) -> Camera2D {
        Camera2D {
            target: self.target,
            zoom: vec2(2.0 / self.window.x, 2.0 / self.window.y),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> CameraRig {
        CameraRig::new(vec2(800.0, 400.0))
    }

    #[test]
    fn test_follow_eases() {
        let mut cam = rig();
        let ground = Rect::new(-200.0, 300.0, 1200.0, 100.0);
        cam.follow(500.0, ground);
        assert!((cam.target.x - 410.0).abs() < 1e-4);
        assert_eq!(cam.target.y, 200.0);
    }

    #[test]
    fn test_follow_clamps_to_ground() {
        let mut cam = rig();
        let ground = Rect::new(-200.0, 300.0, 1200.0, 100.0);
        for _ in 0..500 {
            cam.follow(5000.0, ground);
        }
        // ground right 1000 - half window 400
        assert!((cam.target.x - 600.0).abs() < 1e-2);

        // A ground narrower than the window is not clamped
        let narrow = Rect::new(0.0, 300.0, 100.0, 100.0);
        for _ in 0..500 {
            cam.follow(5000.0, narrow);
        }
        assert!((cam.target.x - 5000.0).abs() < 1e-1);
    }

    #[test]
    fn test_resize_and_snap() {
        let mut cam = rig();
        cam.resize(vec2(1000.0, 600.0));
        assert_eq!(cam.offset, vec2(500.0, 300.0));
        cam.snap_to(123.0);
        assert_eq!(cam.target, vec2(123.0, 300.0));
    }
}
