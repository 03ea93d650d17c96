//! Shared pieces of the static rectangles (ground, finish line)
//!
//! Dimension validation, scaling about the center, and the tile layout used
//! to repeat a texture across a rectangle with the last row/column clipped.

use std::fmt;

use log::warn;
use macroquad::prelude::Texture2D;

use super::geometry::Rect;

pub const MIN_DIMENSION: f32 = 1.0;
/// Tiling beyond this many tiles per axis is reported as suspicious
pub const MAX_TILES: usize = 1000;

/// Error type for static rectangle construction and reshaping
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    WidthOutOfRange { width: f32, max: f32 },
    HeightOutOfRange { height: f32, max: f32 },
    NonPositiveScale(f32),
    InvalidTexture { width: f32, height: f32 },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::WidthOutOfRange { width, max } => {
                write!(f, "width {} must be between {} and {}", width, MIN_DIMENSION, max)
            }
            ShapeError::HeightOutOfRange { height, max } => {
                write!(f, "height {} must be between {} and {}", height, MIN_DIMENSION, max)
            }
            ShapeError::NonPositiveScale(s) => write!(f, "scale factor {} must be positive", s),
            ShapeError::InvalidTexture { width, height } => {
                write!(f, "texture has invalid dimensions {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for ShapeError {}

pub fn validate_dimensions(width: f32, height: f32, max: f32) -> Result<(), ShapeError> {
    if !(MIN_DIMENSION..=max).contains(&width) {
        return Err(ShapeError::WidthOutOfRange { width, max });
    }
    if !(MIN_DIMENSION..=max).contains(&height) {
        return Err(ShapeError::HeightOutOfRange { height, max });
    }
    Ok(())
}

/// Resize `bounds` by per-axis factors, keeping its center fixed
pub fn scaled_about_center(bounds: Rect, factor_x: f32, factor_y: f32, max: f32) -> Result<Rect, ShapeError> {
    if !(factor_x > 0.0) {
        return Err(ShapeError::NonPositiveScale(factor_x));
    }
    if !(factor_y > 0.0) {
        return Err(ShapeError::NonPositiveScale(factor_y));
    }
    let w = bounds.w * factor_x;
    let h = bounds.h * factor_y;
    validate_dimensions(w, h, max)?;
    let center = bounds.center();
    Ok(Rect::new(center.x - w / 2.0, center.y - h / 2.0, w, h))
}

/// A loaded texture together with its pixel size
#[derive(Debug, Clone)]
pub struct SurfaceTexture {
    pub texture: Texture2D,
    pub width: f32,
    pub height: f32,
}

impl SurfaceTexture {
    /// Wrap a loaded texture, rejecting degenerate sizes
    pub fn new(texture: Texture2D) -> Result<Self, ShapeError> {
        let (width, height) = (texture.width(), texture.height());
        if width <= 0.0 || height <= 0.0 {
            return Err(ShapeError::InvalidTexture { width, height });
        }
        Ok(Self { texture, width, height })
    }
}

/// One repetition of a tiled texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Region of the texture to sample (pixels)
    pub source: Rect,
    /// Region of the world to cover
    pub dest: Rect,
}

/// Number of tiles per axis needed to cover `bounds`
pub fn tile_layout(bounds: Rect, texture_width: f32, texture_height: f32) -> (usize, usize) {
    let tiles_x = (bounds.w / texture_width).ceil().max(0.0) as usize;
    let tiles_y = (bounds.h / texture_height).ceil().max(0.0) as usize;
    if tiles_x > MAX_TILES || tiles_y > MAX_TILES {
        warn!(
            "Texture tiling {}x{} exceeds maximum ({}) - performance may be affected",
            tiles_x, tiles_y, MAX_TILES
        );
    }
    (tiles_x, tiles_y)
}

/// Lay out a texture across `bounds`, clipping tiles at the right and bottom
/// edges and shrinking their source regions proportionally.
pub fn tiles(bounds: Rect, texture_width: f32, texture_height: f32) -> impl Iterator<Item = Tile> {
    let (tiles_x, tiles_y) = if texture_width > 0.0 && texture_height > 0.0 {
        tile_layout(bounds, texture_width, texture_height)
    } else {
        (0, 0)
    };

    (0..tiles_x)
        .flat_map(move |tx| (0..tiles_y).map(move |ty| (tx, ty)))
        .filter_map(move |(tx, ty)| {
            let dest = Rect::new(
                bounds.x + tx as f32 * texture_width,
                bounds.y + ty as f32 * texture_height,
                texture_width,
                texture_height,
            );
            let mut clipped = dest;
            if clipped.right() > bounds.right() {
                clipped.w = bounds.right() - clipped.x;
            }
            if clipped.bottom() > bounds.bottom() {
                clipped.h = bounds.bottom() - clipped.y;
            }
            if clipped.w <= 0.0 || clipped.h <= 0.0 {
                return None;
            }
            let source = Rect::new(
                0.0,
                0.0,
                texture_width * (clipped.w / dest.w),
                texture_height * (clipped.h / dest.h),
            );
            Some(Tile { source, dest: clipped })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dimensions() {
        assert!(validate_dimensions(1.0, 1.0, 100.0).is_ok());
        assert!(validate_dimensions(100.0, 100.0, 100.0).is_ok());
        assert_eq!(
            validate_dimensions(0.5, 10.0, 100.0),
            Err(ShapeError::WidthOutOfRange { width: 0.5, max: 100.0 })
        );
        assert!(validate_dimensions(10.0, 101.0, 100.0).is_err());
        assert!(validate_dimensions(f32::NAN, 10.0, 100.0).is_err());
    }

    #[test]
    fn test_scale_about_center() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        let scaled = scaled_about_center(r, 2.0, 2.0, 1000.0).unwrap();
        assert_eq!(scaled, Rect::new(-50.0, -25.0, 200.0, 100.0));
        assert_eq!(scaled.center(), r.center());
        assert_eq!(scaled_about_center(r, 0.0, 1.0, 1000.0), Err(ShapeError::NonPositiveScale(0.0)));
        assert!(scaled_about_center(r, 100.0, 1.0, 1000.0).is_err());
    }

    #[test]
    fn test_tiles_clip_last_column_and_row() {
        let bounds = Rect::new(10.0, 20.0, 40.0, 20.0);
        let tiles: Vec<Tile> = tiles(bounds, 16.0, 16.0).collect();
        // ceil(40/16) = 3 columns, ceil(20/16) = 2 rows
        assert_eq!(tiles.len(), 6);

        let last = tiles.last().unwrap();
        assert_eq!(last.dest, Rect::new(42.0, 36.0, 8.0, 4.0));
        assert_eq!(last.source, Rect::new(0.0, 0.0, 8.0, 4.0));

        for t in &tiles {
            assert!(bounds.encloses(&t.dest));
        }
        let covered: f32 = tiles.iter().map(|t| t.dest.area()).sum();
        assert!((covered - bounds.area()).abs() < 1e-3);
    }

    #[test]
    fn test_tiles_exact_fit() {
        let tiles: Vec<Tile> = tiles(Rect::new(0.0, 0.0, 32.0, 16.0), 16.0, 16.0).collect();
        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|t| t.source == Rect::new(0.0, 0.0, 16.0, 16.0)));
    }

    #[test]
    fn test_tiles_degenerate_texture() {
        assert_eq!(tiles(Rect::new(0.0, 0.0, 32.0, 16.0), 0.0, 16.0).count(), 0);
        assert_eq!(tiles(Rect::new(0.0, 0.0, 32.0, 16.0), 16.0, -1.0).count(), 0);
    }
}
