//! Ground platforms

use log::warn;
use macroquad::prelude::*;

use super::geometry::{Circle, Rect};
use super::surface::{self, scaled_about_center, validate_dimensions, ShapeError, SurfaceTexture};

pub const MAX_DIMENSION: f32 = 10000.0;
pub const DEFAULT_COLOR: Color = GREEN;

/// A solid rectangle entities stand on
#[derive(Debug, Clone)]
pub struct Ground {
    bounds: Rect,
    texture: Option<SurfaceTexture>,
    tint: Color,
}

impl Ground {
    /// Plain green ground
    pub fn new(bounds: Rect) -> Result<Self, ShapeError> {
        Self::with_color(bounds, DEFAULT_COLOR)
    }

    pub fn with_color(bounds: Rect, color: Color) -> Result<Self, ShapeError> {
        validate_dimensions(bounds.w, bounds.h, MAX_DIMENSION)?;
        Ok(Self { bounds, texture: None, tint: color })
    }

    pub fn with_texture(bounds: Rect, texture: Texture2D) -> Result<Self, ShapeError> {
        Self::with_texture_tint(bounds, texture, WHITE)
    }

    pub fn with_texture_tint(bounds: Rect, texture: Texture2D, tint: Color) -> Result<Self, ShapeError> {
        validate_dimensions(bounds.w, bounds.h, MAX_DIMENSION)?;
        Ok(Self { bounds, texture: Some(SurfaceTexture::new(texture)?), tint })
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn tint(&self) -> Color {
        self.tint
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    pub fn area(&self) -> f32 {
        self.bounds.area()
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
        circle.overlaps_rect(&self.bounds)
    }

    pub fn collides_with_rect(&self, rect: &Rect) -> bool {
        self.bounds.overlaps(rect)
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.bounds.contains(point)
    }

    /// Circle lies fully within the ground
    pub fn is_circle_inside(&self, circle: &Circle) -> bool {
        self.bounds.encloses_circle(circle)
    }

    /// Rectangle lies fully within the ground
    pub fn is_rect_inside(&self, rect: &Rect) -> bool {
        self.bounds.encloses(rect)
    }

    // Drawing

    pub fn draw(&self) {
        self.draw_at(self.bounds);
    }

    pub fn draw_with_offset(&self, offset: Vec2) {
        self.draw_at(self.bounds.offset(offset));
    }

    pub fn draw_outline(&self, thickness: f32, color: Color) {
        let b = self.bounds;
        draw_rectangle_lines(b.x, b.y, b.w, b.h, thickness, color);
    }

    fn draw_at(&self, bounds: Rect) {
        match &self.texture {
            Some(tex) => draw_tiled(bounds, tex, self.tint),
            None => draw_rectangle(bounds.x, bounds.y, bounds.w, bounds.h, self.tint),
        }
    }
}

/// Repeat `tex` across `bounds`, falling back to a solid fill when the
/// texture has lost its size.
pub(crate) fn draw_tiled(bounds: Rect, tex: &SurfaceTexture, tint: Color) {
    if tex.width <= 0.0 || tex.height <= 0.0 {
        warn!("Degenerate texture {}x{}, drawing solid fill", tex.width, tex.height);
        draw_rectangle(bounds.x, bounds.y, bounds.w, bounds.h, tint);
        return;
    }
    for tile in surface::tiles(bounds, tex.width, tex.height) {
        draw_texture_ex(
            &tex.texture,
            tile.dest.x,
            tile.dest.y,
            tint,
            DrawTextureParams {
                dest_size: Some(vec2(tile.dest.w, tile.dest.h)),
                source: Some(tile.source.to_macroquad()),
                ..Default::default()
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground() -> Ground {
        Ground::new(Rect::new(0.0, 400.0, 800.0, 100.0)).unwrap()
    }

    #[test]
    fn test_construction_limits() {
        assert!(Ground::new(Rect::new(0.0, 0.0, 0.0, 10.0)).is_err());
        assert!(Ground::new(Rect::new(0.0, 0.0, 10001.0, 10.0)).is_err());
        assert!(Ground::new(Rect::new(0.0, 0.0, 10000.0, 1.0)).is_ok());
        assert_eq!(ground().tint(), GREEN);
        assert!(!ground().has_texture());
    }

    #[test]
    fn test_resize_keeps_old_bounds_on_error() {
        let mut g = ground();
        assert!(g.set_size(-5.0, 10.0).is_err());
        assert_eq!(g.bounds().w, 800.0);
        assert!(g.set_bounds(Rect::new(0.0, 0.0, 20000.0, 5.0)).is_err());
        assert_eq!(g.bounds(), Rect::new(0.0, 400.0, 800.0, 100.0));
        assert!(g.scale(20.0).is_err());
        assert!(g.scale(-1.0).is_err());
        g.scale(0.5).unwrap();
        assert_eq!(g.bounds(), Rect::new(200.0, 425.0, 400.0, 50.0));
    }

    #[test]
    fn test_queries() {
        let mut g = ground();
        assert!(g.collides_with_circle(&Circle::new(100.0, 390.0, 15.0)));
        assert!(!g.collides_with_circle(&Circle::new(100.0, 380.0, 15.0)));
        assert!(g.is_circle_inside(&Circle::new(100.0, 450.0, 10.0)));
        assert!(!g.is_circle_inside(&Circle::new(100.0, 405.0, 10.0)));
        assert!(g.contains_point(vec2(0.0, 400.0)));
        assert!(g.is_rect_inside(&Rect::new(10.0, 410.0, 5.0, 5.0)));
        assert!(g.collides_with_rect(&Rect::new(790.0, 390.0, 50.0, 50.0)));

        g.move_by(100.0, -100.0);
        assert_eq!(g.bounds().x, 100.0);
        assert_eq!(g.center(), vec2(500.0, 350.0));
        assert_eq!(g.area(), 80000.0);
    }
}
