//! 2D geometry primitives
//!
//! Circles bound every moving entity; axis-aligned rectangles bound grounds,
//! the finish line and menu widgets. All overlap tests are plain arithmetic
//! and never touch the graphics context.

use macroquad::prelude::Vec2;

/// A circle defined by center and radius
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { center: Vec2::new(x, y), radius }
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.radius
    }

    /// True when the two circles overlap (touching counts)
    pub fn overlaps(&self, other: &Circle) -> bool {
        let r = self.radius + other.radius;
        self.center.distance_squared(other.center) <= r * r
    }

    /// True when the circle touches or overlaps the rectangle
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        let closest = Vec2::new(
            self.center.x.clamp(rect.x, rect.right()),
            self.center.y.clamp(rect.y, rect.bottom()),
        );
        self.center.distance_squared(closest) <= self.radius * self.radius
    }
}

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Check if point is inside (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// True when the rectangles share any area
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x && self.y < other.bottom() && self.bottom() > other.y
    }

    /// True when `other` lies entirely within this rectangle
    pub fn encloses(&self, other: &Rect) -> bool {
        other.x >= self.x && other.right() <= self.right() && other.y >= self.y && other.bottom() <= self.bottom()
    }

    /// True when the circle's bounding box lies entirely within this rectangle
    pub fn encloses_circle(&self, circle: &Circle) -> bool {
        circle.left() >= self.x
            && circle.right() <= self.right()
            && circle.top() >= self.y
            && circle.bottom() <= self.bottom()
    }

    /// Same size, shifted by `offset`
    pub fn offset(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    pub fn to_macroquad(self) -> macroquad::prelude::Rect {
        macroquad::prelude::Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Frame-rate independent approach of `from` toward `to` by `t` (0..1)
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_rect_overlap() {
        let rect = Rect::new(0.0, 100.0, 200.0, 50.0);
        assert!(Circle::new(50.0, 90.0, 15.0).overlaps_rect(&rect));
        assert!(!Circle::new(50.0, 80.0, 15.0).overlaps_rect(&rect));
        // Corner: closest point is (200, 100)
        assert!(!Circle::new(212.0, 88.0, 15.0).overlaps_rect(&rect));
        assert!(Circle::new(208.0, 94.0, 15.0).overlaps_rect(&rect));
    }

    #[test]
    fn test_circles_overlap() {
        let a = Circle::new(0.0, 0.0, 10.0);
        assert!(a.overlaps(&Circle::new(15.0, 0.0, 5.0)));
        assert!(!a.overlaps(&Circle::new(15.1, 0.0, 5.0)));
    }

    #[test]
    fn test_rect_queries() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.encloses(&Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!outer.encloses(&Rect::new(90.0, 10.0, 20.0, 20.0)));
        assert!(outer.overlaps(&Rect::new(90.0, 10.0, 20.0, 20.0)));
        assert!(!outer.overlaps(&Rect::new(100.0, 10.0, 20.0, 20.0)));
        assert!(outer.contains(Vec2::new(100.0, 100.0)));
        assert!(outer.encloses_circle(&Circle::new(50.0, 50.0, 50.0)));
        assert!(!outer.encloses_circle(&Circle::new(50.0, 50.0, 51.0)));
        assert_eq!(outer.center(), Vec2::new(50.0, 50.0));
    }
}
