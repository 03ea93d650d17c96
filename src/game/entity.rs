//! Gravity-affected circular entity
//!
//! Player and Enemy both embed an `Entity`. It carries the circle bounds,
//! the vertical velocity integrated by gravity, and the flags consulted by
//! ground collision.

use std::fmt;

use macroquad::prelude::Vec2;

use super::geometry::Circle;

/// Upward impulse applied by `Entity::jump` (screen space, +y is down)
pub const JUMP_FORCE: f32 = -550.0;
pub const MIN_RADIUS: f32 = 1.0;
pub const MAX_RADIUS: f32 = 1000.0;

/// Error type for entity construction and resizing
#[derive(Debug, Clone, PartialEq)]
pub enum EntityError {
    RadiusOutOfRange(f32),
    ScaleOutOfRange(f32),
    SpeedOutOfRange { speed: f32, min: f32, max: f32 },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::RadiusOutOfRange(r) => {
                write!(f, "entity radius {} outside {}..={}", r, MIN_RADIUS, MAX_RADIUS)
            }
            EntityError::ScaleOutOfRange(s) => write!(f, "scale {} out of range", s),
            EntityError::SpeedOutOfRange { speed, min, max } => {
                write!(f, "speed {} outside {}..={}", speed, min, max)
            }
        }
    }
}

impl std::error::Error for EntityError {}

fn validate_radius(radius: f32) -> Result<(), EntityError> {
    if (MIN_RADIUS..=MAX_RADIUS).contains(&radius) {
        Ok(())
    } else {
        Err(EntityError::RadiusOutOfRange(radius))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    bounds: Circle,
    velocity_y: f32,
    on_ground: bool,
    /// Skips ground collision entirely
    can_phase: bool,
}

impl Entity {
    pub fn new(center: Vec2, radius: f32) -> Result<Self, EntityError> {
        validate_radius(radius)?;
        Ok(Self {
            bounds: Circle { center, radius },
            velocity_y: 0.0,
            on_ground: false,
            can_phase: false,
        })
    }

    pub fn bounds(&self) -> Circle {
        self.bounds
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center
    }

    pub fn x(&self) -> f32 {
        self.bounds.center.x
    }

    pub fn y(&self) -> f32 {
        self.bounds.center.y
    }

    pub fn radius(&self) -> f32 {
        self.bounds.radius
    }

    pub fn velocity_y(&self) -> f32 {
        self.velocity_y
    }

    pub fn is_on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn can_phase(&self) -> bool {
        self.can_phase
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.bounds.center = position;
    }

    pub fn set_x(&mut self, x: f32) {
        self.bounds.center.x = x;
    }

    pub fn set_y(&mut self, y: f32) {
        self.bounds.center.y = y;
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<(), EntityError> {
        validate_radius(radius)?;
        self.bounds.radius = radius;
        Ok(())
    }

    pub fn set_velocity_y(&mut self, velocity: f32) {
        self.velocity_y = velocity;
    }

    pub fn set_on_ground(&mut self, on_ground: bool) {
        self.on_ground = on_ground;
    }

    pub fn set_can_phase(&mut self, can_phase: bool) {
        self.can_phase = can_phase;
    }

    pub fn move_by(&mut self, delta: Vec2) {
        self.bounds.center += delta;
    }

    pub fn jump(&mut self) {
        self.velocity_y = JUMP_FORCE;
        self.on_ground = false;
    }

    /// Integrate gravity into velocity, then velocity into position
    pub fn apply_gravity(&mut self, gravity: f32, delta_time: f32) {
        self.velocity_y += gravity * delta_time;
        self.bounds.center.y += self.velocity_y * delta_time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_bounds() {
        assert!(Entity::new(Vec2::ZERO, 0.5).is_err());
        assert!(Entity::new(Vec2::ZERO, 1000.5).is_err());
        assert!(Entity::new(Vec2::ZERO, f32::NAN).is_err());

        let mut e = Entity::new(Vec2::ZERO, 10.0).unwrap();
        assert_eq!(e.set_radius(2000.0), Err(EntityError::RadiusOutOfRange(2000.0)));
        assert_eq!(e.radius(), 10.0);
        e.set_radius(1.0).unwrap();
        assert_eq!(e.radius(), 1.0);
    }

    #[test]
    fn test_jump_leaves_ground() {
        let mut e = Entity::new(Vec2::new(5.0, 5.0), 10.0).unwrap();
        e.set_on_ground(true);
        e.jump();
        assert!(!e.is_on_ground());
        assert_eq!(e.velocity_y(), JUMP_FORCE);
    }

    #[test]
    fn test_gravity_integration() {
        let mut e = Entity::new(Vec2::new(0.0, 100.0), 10.0).unwrap();
        e.apply_gravity(900.0, 0.1);
        assert!((e.velocity_y() - 90.0).abs() < 1e-4);
        assert!((e.y() - 109.0).abs() < 1e-4);
        e.move_by(Vec2::new(3.0, -9.0));
        assert_eq!(e.center(), Vec2::new(3.0, 100.0));
    }
}
