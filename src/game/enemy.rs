//! Enemies (Juicy Boy's Brother)
//!
//! Enemies walk toward the finish line and hop when the player is close in
//! front of them. Reaching the finish line costs the player size.

use log::warn;
use macroquad::prelude::Vec2;

use super::entity::{Entity, EntityError};

pub const DEFAULT_MOVE_SPEED: f32 = 200.0;
const MIN_MOVE_SPEED: f32 = 1.0;
const MAX_MOVE_SPEED: f32 = 1000.0;
const ANIMATION_INTERVAL: f32 = 0.1;
const PLAYER_DETECTION_RANGE: f32 = 200.0;
const VOLUME_DISTANCE_FACTOR: f32 = 1000.0;
const MIN_VOLUME_DISTANCE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }
}

/// Sprite frames, indexing the enemy texture list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyFrame {
    Idle = 0,
    Running1 = 1,
    Running2 = 2,
    Running3 = 3,
}

impl EnemyFrame {
    pub const COUNT: usize = 4;

    pub fn index(self) -> usize {
        self as usize
    }

    fn next_running(self) -> Self {
        match self {
            EnemyFrame::Running1 => EnemyFrame::Running2,
            EnemyFrame::Running2 => EnemyFrame::Running3,
            EnemyFrame::Running3 | EnemyFrame::Idle => EnemyFrame::Running1,
        }
    }
}

fn validate_speed(speed: f32) -> Result<(), EntityError> {
    if (MIN_MOVE_SPEED..=MAX_MOVE_SPEED).contains(&speed) {
        Ok(())
    } else {
        Err(EntityError::SpeedOutOfRange { speed, min: MIN_MOVE_SPEED, max: MAX_MOVE_SPEED })
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    entity: Entity,
    move_speed: f32,
    animation_timer: f32,
    frame: EnemyFrame,
    direction: Direction,
    is_moving: bool,
}

impl Enemy {
    pub fn new(x: f32, y: f32, radius: f32, speed: f32, direction: Direction) -> Result<Self, EntityError> {
        validate_speed(speed)?;
        Ok(Self {
            entity: Entity::new(Vec2::new(x, y), radius)?,
            move_speed: speed,
            animation_timer: 0.0,
            frame: EnemyFrame::Idle,
            direction,
            is_moving: false,
        })
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn frame(&self) -> EnemyFrame {
        self.frame
    }

    pub fn flip_direction(&mut self) {
        self.direction = self.direction.flipped();
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn set_move_speed(&mut self, speed: f32) -> Result<(), EntityError> {
        validate_speed(speed)?;
        self.move_speed = speed;
        Ok(())
    }

    /// Walk toward `finish_line_x` and hop at a nearby player.
    pub fn execute_ai(&mut self, delta_time: f32, map_width: f32, finish_line_x: f32, player: &Entity) {
        if delta_time <= 0.0 {
            warn!("Invalid delta time {} passed to enemy AI", delta_time);
            return;
        }
        self.update_movement(delta_time, map_width, finish_line_x);
        if self.entity.is_on_ground() && self.is_player_in_jump_range(player) {
            self.entity.jump();
        }
    }

    fn update_movement(&mut self, delta_time: f32, map_width: f32, finish_line_x: f32) {
        let x = self.entity.x();
        let r = self.entity.radius();
        self.is_moving = false;

        if x < finish_line_x && x + r < map_width {
            self.direction = Direction::Right;
            self.entity.set_x(x + self.move_speed * delta_time);
            self.is_moving = true;
        } else if x > finish_line_x && x - r > 0.0 {
            self.direction = Direction::Left;
            self.entity.set_x(x - self.move_speed * delta_time);
            self.is_moving = true;
        }
    }

    /// Player within detection range on the side the enemy faces
    pub fn is_player_in_jump_range(&self, player: &Entity) -> bool {
        let px = player.x();
        let ex = self.entity.x();
        if (px - ex).abs() > PLAYER_DETECTION_RANGE {
            return false;
        }
        match self.direction {
            Direction::Right => px >= ex,
            Direction::Left => px <= ex,
        }
    }

    /// Attenuation for positional sounds emitted by this enemy
    pub fn volume_by_distance(&self, player: &Entity) -> f32 {
        let distance = (self.entity.x() - player.x()).abs().max(MIN_VOLUME_DISTANCE);
        (1.0 - VOLUME_DISTANCE_FACTOR / distance).clamp(0.0, 1.0)
    }

    /// Advance the run animation
    pub fn update(&mut self, delta_time: f32) {
        if delta_time <= 0.0 {
            return;
        }
        if !self.entity.is_on_ground() {
            self.frame = EnemyFrame::Running1;
            self.animation_timer = 0.0;
        } else if self.is_moving {
            self.animation_timer += delta_time;
            if self.animation_timer >= ANIMATION_INTERVAL {
                self.frame = self.frame.next_running();
                self.animation_timer = 0.0;
            }
        } else {
            self.frame = EnemyFrame::Idle;
            self.animation_timer = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded_enemy(x: f32, direction: Direction) -> Enemy {
        let mut e = Enemy::new(x, 100.0, 16.0, 200.0, direction).unwrap();
        e.entity_mut().set_on_ground(true);
        e
    }

    fn player_at(x: f32) -> Entity {
        Entity::new(Vec2::new(x, 100.0), 32.0).unwrap()
    }

    #[test]
    fn test_speed_validation() {
        assert!(Enemy::new(0.0, 0.0, 16.0, 0.0, Direction::Right).is_err());
        assert!(Enemy::new(0.0, 0.0, 16.0, 1001.0, Direction::Right).is_err());
        let mut e = Enemy::new(0.0, 0.0, 16.0, 1000.0, Direction::Right).unwrap();
        assert!(e.set_move_speed(5000.0).is_err());
        assert_eq!(e.move_speed(), 1000.0);
    }

    #[test]
    fn test_walks_toward_finish_line() {
        let far_player = player_at(5000.0);
        let mut e = grounded_enemy(100.0, Direction::Left);
        e.execute_ai(0.5, 2000.0, 500.0, &far_player);
        assert_eq!(e.entity().x(), 200.0);
        assert_eq!(e.direction(), Direction::Right);

        let mut e = grounded_enemy(900.0, Direction::Right);
        e.execute_ai(0.5, 2000.0, 500.0, &far_player);
        assert_eq!(e.entity().x(), 800.0);
        assert_eq!(e.direction(), Direction::Left);
    }

    #[test]
    fn test_stops_at_map_edges() {
        let far_player = player_at(5000.0);
        // Right edge already beyond the map width
        let mut e = grounded_enemy(1990.0, Direction::Right);
        e.execute_ai(0.5, 2000.0, 3000.0, &far_player);
        assert_eq!(e.entity().x(), 1990.0);
        assert!(!e.is_moving());

        // Left edge already beyond zero
        let mut e = grounded_enemy(10.0, Direction::Left);
        e.execute_ai(0.5, 2000.0, -100.0, &far_player);
        assert_eq!(e.entity().x(), 10.0);
    }

    #[test]
    fn test_jumps_at_player_in_front() {
        let mut e = grounded_enemy(100.0, Direction::Right);
        e.execute_ai(0.01, 2000.0, 500.0, &player_at(250.0));
        assert!(!e.entity().is_on_ground());
        assert!(e.entity().velocity_y() < 0.0);

        // Behind the enemy: no jump
        let mut e = grounded_enemy(100.0, Direction::Right);
        e.execute_ai(0.01, 2000.0, 500.0, &player_at(50.0));
        assert!(e.entity().is_on_ground());

        // Airborne enemies never jump again
        let mut e = grounded_enemy(100.0, Direction::Right);
        e.entity_mut().set_on_ground(false);
        e.execute_ai(0.01, 2000.0, 500.0, &player_at(150.0));
        assert_eq!(e.entity().velocity_y(), 0.0);
    }

    #[test]
    fn test_volume_by_distance() {
        let e = grounded_enemy(0.0, Direction::Right);
        assert_eq!(e.volume_by_distance(&player_at(500.0)), 0.0);
        assert!((e.volume_by_distance(&player_at(2000.0)) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_animation_cycle() {
        let mut e = grounded_enemy(100.0, Direction::Right);
        e.update(0.05);
        assert_eq!(e.frame(), EnemyFrame::Idle);

        e.execute_ai(0.01, 2000.0, 500.0, &player_at(5000.0));
        e.update(0.12);
        assert_eq!(e.frame(), EnemyFrame::Running1);
        e.update(0.12);
        assert_eq!(e.frame(), EnemyFrame::Running2);
        e.update(0.12);
        assert_eq!(e.frame(), EnemyFrame::Running3);
        e.update(0.12);
        assert_eq!(e.frame(), EnemyFrame::Running1);

        e.entity_mut().set_on_ground(false);
        e.update(0.01);
        assert_eq!(e.frame(), EnemyFrame::Running1);
    }

    #[test]
    fn test_flip_direction() {
        let mut e = grounded_enemy(0.0, Direction::Left);
        e.flip_direction();
        assert_eq!(e.direction(), Direction::Right);
    }
}
