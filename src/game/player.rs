//! Player character (Gobo)
//!
//! Gobo grows by eating enemies sideways, shrinks when landed on or when an
//! enemy reaches the finish line, and at full size earns a bomb.

use log::warn;
use macroquad::prelude::Vec2;

use super::entity::{Entity, EntityError};
use super::geometry::Rect;

pub const DEFAULT_MOVE_SPEED: f32 = 200.0;
const DAMAGE_SCALE_FACTOR: f32 = 0.75;
const GROWTH_SCALE_FACTOR: f32 = 1.2;
const SHRINK_SCALE_FACTOR: f32 = 1.1;
const BOMB_RADIUS_REDUCTION: f32 = 0.75;
const ANIMATION_INTERVAL: f32 = 0.2;

const MIN_SCALE: f32 = 0.1;
const MAX_SCALE: f32 = 10.0;
/// Growth stops here even though construction accepts up to MAX_SCALE
const MAX_GROWTH_SCALE: f32 = 5.0;
const MIN_SPEED: f32 = 1.0;
const MAX_SPEED: f32 = 2000.0;

/// Sprite frames, indexing the player texture list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerFrame {
    Standing = 0,
    Walking = 1,
    Idle = 2,
}

impl PlayerFrame {
    pub const COUNT: usize = 3;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Player controls sampled for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    /// Edge-triggered: true only on the frame the button went down
    pub bomb: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    entity: Entity,
    move_speed: f32,
    /// Radius at scale 1.0
    original_radius: f32,
    size_scale: f32,
    animation_timer: f32,
    kill_count: u32,
    frame: PlayerFrame,
    is_moving: bool,
    can_use_bomb: bool,
}

impl Player {
    pub fn new(x: f32, y: f32, radius: f32, scale: f32, speed: f32) -> Result<Self, EntityError> {
        if !(MIN_SCALE..=MAX_SCALE).contains(&scale) {
            return Err(EntityError::ScaleOutOfRange(scale));
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(EntityError::SpeedOutOfRange { speed, min: MIN_SPEED, max: MAX_SPEED });
        }
        let entity = Entity::new(Vec2::new(x, y), radius * scale)?;
        Ok(Self {
            entity,
            move_speed: speed,
            original_radius: radius,
            size_scale: scale,
            animation_timer: 0.0,
            kill_count: 0,
            frame: PlayerFrame::Standing,
            is_moving: false,
            can_use_bomb: false,
        })
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    pub fn kill_count(&self) -> u32 {
        self.kill_count
    }

    pub fn can_use_bomb(&self) -> bool {
        self.can_use_bomb
    }

    pub fn size_scale(&self) -> f32 {
        self.size_scale
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn frame(&self) -> PlayerFrame {
        self.frame
    }

    /// The run loop should be audible this frame
    pub fn is_walking_on_ground(&self) -> bool {
        self.is_moving && self.entity.is_on_ground()
    }

    pub fn increment_kill_count(&mut self) {
        self.kill_count += 1;
    }

    pub fn enable_bomb(&mut self) {
        self.can_use_bomb = true;
    }

    pub fn take_damage(&mut self) {
        self.size_scale = (self.size_scale * DAMAGE_SCALE_FACTOR).max(MIN_SCALE);
        self.update_radius();
    }

    pub fn grow_larger(&mut self) {
        self.size_scale = (self.size_scale * GROWTH_SCALE_FACTOR).min(MAX_GROWTH_SCALE);
        self.update_radius();
    }

    pub fn shrink_size(&mut self) {
        self.size_scale = (self.size_scale / SHRINK_SCALE_FACTOR).max(MIN_SCALE);
        self.update_radius();
    }

    pub fn reset_to_original_size(&mut self) {
        self.size_scale = 1.0;
        self.update_radius();
    }

    fn update_radius(&mut self) {
        let new_radius = self.original_radius * self.size_scale;
        if let Err(e) = self.entity.set_radius(new_radius) {
            warn!("Failed to update player radius: {}", e);
        }
    }

    /// Apply one frame of movement and bomb input.
    ///
    /// Movement is bounded by the horizontal extent of `ground`. Returns the
    /// position where a bomb explosion should start, if one was dropped.
    pub fn handle_input(&mut self, delta_time: f32, input: PlayerInput, ground: Rect) -> Option<Vec2> {
        if delta_time <= 0.0 {
            return None;
        }

        self.handle_movement(delta_time, input, ground);
        if input.bomb {
            self.drop_bomb()
        } else {
            None
        }
    }

    fn handle_movement(&mut self, delta_time: f32, input: PlayerInput, ground: Rect) {
        let x = self.entity.x();
        let r = self.entity.radius();
        self.is_moving = false;

        if input.right && x + r < ground.right() {
            self.entity.set_x(x + self.move_speed * delta_time);
            self.is_moving = true;
        } else if input.left && x - r > ground.x {
            self.entity.set_x(x - self.move_speed * delta_time);
            self.is_moving = true;
        }
    }

    fn drop_bomb(&mut self) -> Option<Vec2> {
        if !self.can_use_bomb {
            return None;
        }
        let position = Vec2::new(self.entity.x(), self.entity.y() - self.entity.radius());

        let new_radius = self.entity.radius() * BOMB_RADIUS_REDUCTION;
        let (radius, scale) = if new_radius > self.original_radius {
            (new_radius, new_radius / self.original_radius)
        } else {
            (self.original_radius, 1.0)
        };
        match self.entity.set_radius(radius) {
            Ok(()) => self.size_scale = scale,
            Err(e) => warn!("Bomb shrink rejected: {}", e),
        }

        self.can_use_bomb = false;
        Some(position)
    }

    /// Advance the walk/idle animation
    pub fn update(&mut self, delta_time: f32) {
        if delta_time <= 0.0 {
            return;
        }
        self.animation_timer += delta_time;
        if self.animation_timer >= ANIMATION_INTERVAL {
            self.frame = match (self.is_moving, self.frame) {
                (true, PlayerFrame::Standing) => PlayerFrame::Walking,
                (false, PlayerFrame::Standing) => PlayerFrame::Idle,
                _ => PlayerFrame::Standing,
            };
            self.animation_timer = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::{MAX_RADIUS, MIN_RADIUS};

    fn player() -> Player {
        Player::new(100.0, 100.0, 16.0, 2.0, DEFAULT_MOVE_SPEED).unwrap()
    }

    fn wide_ground() -> Rect {
        Rect::new(-1000.0, 200.0, 3000.0, 100.0)
    }

    #[test]
    fn test_construction_validation() {
        assert!(Player::new(0.0, 0.0, 16.0, 0.05, 200.0).is_err());
        assert!(Player::new(0.0, 0.0, 16.0, 11.0, 200.0).is_err());
        assert!(Player::new(0.0, 0.0, 16.0, 2.0, 0.5).is_err());
        assert!(Player::new(0.0, 0.0, 16.0, 2.0, 2500.0).is_err());
        // 200 * 10 exceeds the entity radius limit
        assert!(Player::new(0.0, 0.0, 200.0, 10.0, 200.0).is_err());
        assert_eq!(player().entity().radius(), 32.0);
    }

    #[test]
    fn test_radius_stays_in_bounds() {
        let mut p = player();
        for _ in 0..50 {
            p.take_damage();
            let r = p.entity().radius();
            assert!((MIN_RADIUS..=MAX_RADIUS).contains(&r));
        }
        assert!((p.size_scale() - 0.1).abs() < 1e-6);
        for _ in 0..50 {
            p.grow_larger();
            let r = p.entity().radius();
            assert!((MIN_RADIUS..=MAX_RADIUS).contains(&r));
        }
        assert_eq!(p.size_scale(), 5.0);
        assert_eq!(p.entity().radius(), 80.0);
        for _ in 0..100 {
            p.shrink_size();
        }
        assert!((p.size_scale() - 0.1).abs() < 1e-6);
        p.reset_to_original_size();
        assert_eq!(p.entity().radius(), 16.0);
    }

    #[test]
    fn test_scale_change_keeps_radius_when_invalid() {
        // Base radius 5 at scale 0.1 would be 0.5, below the entity minimum
        let mut p = Player::new(0.0, 0.0, 5.0, 1.0, 200.0).unwrap();
        for _ in 0..20 {
            p.take_damage();
        }
        assert!(p.entity().radius() >= MIN_RADIUS);
    }

    #[test]
    fn test_movement_bounded_by_ground() {
        let mut p = player();
        let input = PlayerInput { right: true, ..Default::default() };
        p.handle_input(0.5, input, wide_ground());
        assert_eq!(p.entity().x(), 200.0);
        assert!(p.is_moving());

        // Right edge of the player already past the ground edge
        let narrow = Rect::new(0.0, 200.0, 120.0, 100.0);
        p.handle_input(0.5, input, narrow);
        assert_eq!(p.entity().x(), 200.0);
        assert!(!p.is_moving());

        let left = PlayerInput { left: true, ..Default::default() };
        p.handle_input(0.5, left, narrow);
        assert_eq!(p.entity().x(), 100.0);
    }

    #[test]
    fn test_right_takes_priority_over_left() {
        let mut p = player();
        let both = PlayerInput { left: true, right: true, bomb: false };
        p.handle_input(0.1, both, wide_ground());
        assert!(p.entity().x() > 100.0);
    }

    #[test]
    fn test_zero_delta_is_ignored() {
        let mut p = player();
        p.enable_bomb();
        let input = PlayerInput { right: true, bomb: true, left: false };
        assert!(p.handle_input(0.0, input, wide_ground()).is_none());
        assert_eq!(p.entity().x(), 100.0);
        assert!(p.can_use_bomb());
    }

    #[test]
    fn test_bomb_requires_availability() {
        let mut p = player();
        let input = PlayerInput { bomb: true, ..Default::default() };
        assert!(p.handle_input(0.016, input, wide_ground()).is_none());

        p.enable_bomb();
        let pos = p.handle_input(0.016, input, wide_ground()).unwrap();
        assert_eq!(pos, Vec2::new(100.0, 100.0 - 32.0));
        assert!(!p.can_use_bomb());
        // 32 * 0.75 = 24 stays above the base radius of 16
        assert_eq!(p.entity().radius(), 24.0);
        assert!((p.size_scale() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_bomb_floors_at_original_radius() {
        let mut p = Player::new(0.0, 0.0, 16.0, 1.2, 200.0).unwrap();
        p.enable_bomb();
        let input = PlayerInput { bomb: true, ..Default::default() };
        p.handle_input(0.016, input, wide_ground());
        assert_eq!(p.entity().radius(), 16.0);
        assert_eq!(p.size_scale(), 1.0);
    }

    #[test]
    fn test_animation_alternates() {
        let mut p = player();
        p.update(0.25);
        assert_eq!(p.frame(), PlayerFrame::Idle);
        p.update(0.25);
        assert_eq!(p.frame(), PlayerFrame::Standing);

        p.handle_input(0.01, PlayerInput { right: true, ..Default::default() }, wide_ground());
        p.update(0.25);
        assert_eq!(p.frame(), PlayerFrame::Walking);
        p.update(0.1);
        assert_eq!(p.frame(), PlayerFrame::Walking);
        p.update(0.15);
        assert_eq!(p.frame(), PlayerFrame::Standing);
    }
}
