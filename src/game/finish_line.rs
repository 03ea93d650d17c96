//! The finish line enemies walk toward
//!
//! An enemy touching an active finish line is removed and costs the player
//! size. Inactive lines ignore every query and draw grey.

use macroquad::prelude::*;

use super::geometry::{Circle, Rect};
use super::ground::draw_tiled;
use super::surface::{scaled_about_center, validate_dimensions, ShapeError, SurfaceTexture};

pub const MAX_DIMENSION: f32 = 5000.0;
pub const DEFAULT_COLOR: Color = YELLOW;
const INACTIVE_COLOR: Color = GRAY;

/// Alpha of the animated draw at time `t`, in 0.6..=1.0
pub fn pulse_alpha(t: f32) -> f32 {
    0.6 + 0.4 * ((3.0 * t).sin() + 1.0) / 2.0
}

#[derive(Debug, Clone)]
pub struct FinishLine {
    bounds: Rect,
    texture: Option<SurfaceTexture>,
    tint: Color,
    active: bool,
}

impl FinishLine {
    pub fn new(bounds: Rect) -> Result<Self, ShapeError> {
        Self::with_color(bounds, DEFAULT_COLOR)
    }

    pub fn with_color(bounds: Rect, color: Color) -> Result<Self, ShapeError> {
        validate_dimensions(bounds.w, bounds.h, MAX_DIMENSION)?;
        Ok(Self { bounds, texture: None, tint: color, active: true })
    }

    pub fn with_texture(bounds: Rect, texture: Texture2D) -> Result<Self, ShapeError> {
        Self::with_texture_tint(bounds, texture, WHITE)
    }

    pub fn with_texture_tint(bounds: Rect, texture: Texture2D, tint: Color) -> Result<Self, ShapeError> {
        validate_dimensions(bounds.w, bounds.h, MAX_DIMENSION)?;
        Ok(Self { bounds, texture: Some(SurfaceTexture::new(texture)?), tint, active: true })
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn tint(&self) -> Color {
        self.tint
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    pub fn area(&self) -> f32 {
        self.bounds.area()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
    }

    pub fn set_size(&mut self, width: f32, height: f32) -> Result<(), ShapeError> {
        validate_dimensions(width, height, MAX_DIMENSION)?;
        self.bounds.w = width;
        self.bounds.h = height;
        Ok(())
    }

    pub fn set_bounds(&mut self, bounds: Rect) -> Result<(), ShapeError> {
        validate_dimensions(bounds.w, bounds.h, MAX_DIMENSION)?;
        self.bounds = bounds;
        Ok(())
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.bounds = self.bounds.offset(vec2(dx, dy));
    }

    pub fn scale(&mut self, factor: f32) -> Result<(), ShapeError> {
        self.scale_xy(factor, factor)
    }

    pub fn scale_xy(&mut self, factor_x: f32, factor_y: f32) -> Result<(), ShapeError> {
        self.bounds = scaled_about_center(self.bounds, factor_x, factor_y, MAX_DIMENSION)?;
        Ok(())
    }

    pub fn set_texture(&mut self, texture: Texture2D) -> Result<(), ShapeError> {
        self.texture = Some(SurfaceTexture::new(texture)?);
        Ok(())
    }

    pub fn remove_texture(&mut self) {
        self.texture = None;
    }

    pub fn set_tint(&mut self, tint: Color) {
        self.tint = tint;
    }

    pub fn collides_with_circle(&self, circle: &Circle) -> bool {
        self.active && circle.overlaps_rect(&self.bounds)
    }

    pub fn collides_with_rect(&self, rect: &Rect) -> bool {
        self.active && self.bounds.overlaps(rect)
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.active && self.bounds.contains(point)
    }

    /// Circle straddles the vertical center line within the line's height
    pub fn is_entity_crossing(&self, circle: &Circle) -> bool {
        if !self.active {
            return false;
        }
        let line_x = self.bounds.center().x;
        let straddles = circle.left() <= line_x && circle.right() >= line_x;
        let within_span = circle.center.y >= self.bounds.y && circle.center.y <= self.bounds.bottom();
        straddles && within_span
    }

    fn current_tint(&self) -> Color {
        if self.active {
            self.tint
        } else {
            INACTIVE_COLOR
        }
    }

    // Drawing

    pub fn draw(&self) {
        self.draw_at(self.bounds, self.current_tint());
    }

    pub fn draw_with_offset(&self, offset: Vec2) {
        self.draw_at(self.bounds.offset(offset), self.current_tint());
    }

    /// Draw with a pulsing alpha driven by `time` (seconds)
    pub fn draw_animated(&self, time: f32) {
        let mut tint = self.current_tint();
        tint.a *= pulse_alpha(time);
        self.draw_at(self.bounds, tint);
    }

    pub fn draw_outline(&self, thickness: f32, color: Color) {
        let b = self.bounds;
        draw_rectangle_lines(b.x, b.y, b.w, b.h, thickness, color);
    }

    fn draw_at(&self, bounds: Rect, tint: Color) {
        match &self.texture {
            Some(tex) => draw_tiled(bounds, tex, tint),
            None => draw_rectangle(bounds.x, bounds.y, bounds.w, bounds.h, tint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> FinishLine {
        FinishLine::new(Rect::new(400.0, 300.0, 200.0, 50.0)).unwrap()
    }

    #[test]
    fn test_dimension_limits() {
        assert!(FinishLine::new(Rect::new(0.0, 0.0, 5001.0, 50.0)).is_err());
        assert!(FinishLine::new(Rect::new(0.0, 0.0, 200.0, 0.0)).is_err());
        let mut f = line();
        assert!(f.set_size(6000.0, 10.0).is_err());
        assert_eq!(f.bounds().w, 200.0);
        assert_eq!(f.tint(), YELLOW);
    }

    #[test]
    fn test_inactive_ignores_queries() {
        let mut f = line();
        let c = Circle::new(500.0, 320.0, 10.0);
        assert!(f.collides_with_circle(&c));
        assert!(f.contains_point(vec2(500.0, 320.0)));

        f.deactivate();
        assert!(!f.collides_with_circle(&c));
        assert!(!f.contains_point(vec2(500.0, 320.0)));
        assert!(!f.is_entity_crossing(&c));
        assert!(!f.collides_with_rect(&Rect::new(450.0, 310.0, 10.0, 10.0)));
        assert_eq!(f.current_tint(), GRAY);

        f.toggle();
        assert!(f.is_active());
    }

    #[test]
    fn test_entity_crossing() {
        let f = line();
        // Center line at x = 500, vertical span 300..350
        assert!(f.is_entity_crossing(&Circle::new(495.0, 320.0, 10.0)));
        assert!(!f.is_entity_crossing(&Circle::new(480.0, 320.0, 10.0)));
        assert!(!f.is_entity_crossing(&Circle::new(500.0, 360.0, 20.0)));
    }

    #[test]
    fn test_scale_about_center() {
        let mut f = line();
        f.scale_xy(2.0, 1.0).unwrap();
        assert_eq!(f.bounds(), Rect::new(300.0, 300.0, 400.0, 50.0));
        assert!(f.scale(0.0).is_err());
    }

    #[test]
    fn test_pulse_alpha_range() {
        for i in 0..100 {
            let a = pulse_alpha(i as f32 * 0.05);
            assert!((0.6..=1.0 + 1e-6).contains(&a));
        }
    }
}
