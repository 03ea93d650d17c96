//! Gameplay session
//!
//! One run of the game: the player, enemies, ground, finish line, bomb
//! explosions and camera, plus the difficulty ramp and enemy spawner.
//! Everything here is plain simulation; drawing lives in the renderer and
//! sounds are requested through `Events`.

use std::fmt;

use log::{debug, info, warn};
use macroquad::prelude::{vec2, Texture2D, Vec2};
use ::rand::Rng;
use serde::{Deserialize, Serialize};

use super::camera::CameraRig;
use super::collision::{resolve_enemy_contact, resolve_ground_collision, Contact};
use super::enemy::{Direction, Enemy};
use super::entity::EntityError;
use super::event::{ContactEvent, Events, ExplosionEvent, FinishEvent, SpawnEvent};
use super::finish_line::FinishLine;
use super::ground::Ground;
use super::layout::{self, Layout};
use super::particles::{ExplosionError, ExplosionManager, ExplosionSettings};
use super::player::{Player, PlayerInput};
use super::surface::ShapeError;

/// Pixel size of the character sprites; also the losing radius
pub const TEXTURE_RESOLUTION: f32 = 16.0;
/// Initial scale for both the player and spawned enemies
pub const START_SCALE: f32 = 2.0;
/// Enemies stop growing here; further difficulty raises hardness instead
const MAX_ENEMY_SCALE: f32 = 4.0;
const START_HARDNESS: f32 = 0.5;
const MAX_HARDNESS: f32 = 1.0;
const DIFFICULTY_STEP: f32 = 1.1;
const SPAWN_INTERVAL_DECAY: f32 = 0.75;
/// Enemies appear this far beyond the visible window edge
const SPAWN_MARGIN: f32 = 10.0;

/// Error type for session setup
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    DegenerateWindow(Vec2),
    Entity(EntityError),
    Shape(ShapeError),
    Explosion(ExplosionError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::DegenerateWindow(size) => {
                write!(f, "cannot lay out a {}x{} window", size.x, size.y)
            }
            SessionError::Entity(e) => write!(f, "invalid entity: {}", e),
            SessionError::Shape(e) => write!(f, "invalid level shape: {}", e),
            SessionError::Explosion(e) => write!(f, "invalid explosion settings: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<EntityError> for SessionError {
    fn from(e: EntityError) -> Self {
        SessionError::Entity(e)
    }
}

impl From<ShapeError> for SessionError {
    fn from(e: ShapeError) -> Self {
        SessionError::Shape(e)
    }
}

impl From<ExplosionError> for SessionError {
    fn from(e: ExplosionError) -> Self {
        SessionError::Explosion(e)
    }
}

/// Gameplay tuning, read from the config file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Downward acceleration in pixels/s²
    pub gravity: f32,
    pub player_speed: f32,
    pub enemy_speed: f32,
    /// Seconds before the first enemy; shrinks after every spawn
    pub initial_spawn_interval: f32,
    /// Seconds between difficulty bumps
    pub difficulty_interval: f32,
    pub max_explosions: usize,
    pub explosion: ExplosionSettings,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            gravity: 900.0,
            player_speed: super::player::DEFAULT_MOVE_SPEED,
            enemy_speed: super::enemy::DEFAULT_MOVE_SPEED,
            initial_spawn_interval: 4.0,
            difficulty_interval: 5.0,
            max_explosions: super::particles::DEFAULT_MAX_EXPLOSIONS,
            explosion: ExplosionSettings::default(),
        }
    }
}

/// Textures the world needs for layout and surfaces. Every field is
/// optional so sessions can be built without a graphics context.
#[derive(Debug, Clone, Default)]
pub struct WorldTextures {
    pub ground: Option<Texture2D>,
    pub finish_line: Option<Texture2D>,
    /// Width of the player sprite, used as its base radius
    pub player_width: Option<f32>,
    /// Width of the enemy sprite, scaled by the current enemy scale
    pub enemy_width: Option<f32>,
}

impl WorldTextures {
    fn finish_line_size(&self) -> Vec2 {
        layout::finish_line_size(self.finish_line.as_ref().map(|t| vec2(t.width(), t.height())))
    }
}

/// Result of one session update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Running,
    /// The player shrank to sprite size
    GameOver,
}

pub struct Session {
    settings: SessionSettings,
    textures: WorldTextures,
    layout: Layout,
    player: Player,
    enemies: Vec<Enemy>,
    grounds: Vec<Ground>,
    finish_line: FinishLine,
    explosions: ExplosionManager,
    camera: CameraRig,
    events: Events,
    enemy_scale: f32,
    hardness: f32,
    spawn_timer: f32,
    spawn_interval: f32,
    difficulty_timer: f32,
}

impl Session {
    pub fn new(window: Vec2, settings: SessionSettings, textures: WorldTextures) -> Result<Self, SessionError> {
        let layout =
            Layout::compute(window, textures.finish_line_size()).ok_or(SessionError::DegenerateWindow(window))?;

        let ground = match &textures.ground {
            Some(tex) => Ground::with_texture(layout.ground, tex.clone())?,
            None => Ground::new(layout.ground)?,
        };
        let finish_line = match &textures.finish_line {
            Some(tex) => FinishLine::with_texture(layout.finish_line, tex.clone())?,
            None => FinishLine::new(layout.finish_line)?,
        };

        let base_radius = textures.player_width.unwrap_or(TEXTURE_RESOLUTION);
        let start = layout.player_start(base_radius);
        let player = Player::new(start.x, start.y, base_radius, START_SCALE, settings.player_speed)?;

        let explosions = ExplosionManager::with_settings(settings.max_explosions, settings.explosion)?;

        info!("New session for a {}x{} window", window.x, window.y);
        Ok(Self {
            settings,
            textures,
            layout,
            player,
            enemies: Vec::new(),
            grounds: vec![ground],
            finish_line,
            explosions,
            camera: CameraRig::new(window),
            events: Events::new(),
            enemy_scale: START_SCALE,
            hardness: START_HARDNESS,
            spawn_timer: 0.0,
            spawn_interval: settings.initial_spawn_interval,
            difficulty_timer: 0.0,
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn grounds(&self) -> &[Ground] {
        &self.grounds
    }

    pub fn finish_line(&self) -> &FinishLine {
        &self.finish_line
    }

    pub fn explosions(&self) -> &ExplosionManager {
        &self.explosions
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn events_mut(&mut self) -> &mut Events {
        &mut self.events
    }

    pub fn enemy_scale(&self) -> f32 {
        self.enemy_scale
    }

    pub fn hardness(&self) -> f32 {
        self.hardness
    }

    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    /// Center the camera on the player immediately
    pub fn snap_camera(&mut self) {
        self.camera.snap_to(self.player.entity().x());
    }

    fn main_ground(&self) -> &Ground {
        &self.grounds[0]
    }

    /// Re-lay out the world for a new window size. Degenerate sizes are
    /// logged and ignored.
    pub fn resize(&mut self, window: Vec2) {
        let Some(layout) = Layout::compute(window, self.textures.finish_line_size()) else {
            warn!("Ignoring resize to degenerate window {}x{}", window.x, window.y);
            return;
        };
        if let Err(e) = self.grounds[0].set_bounds(layout.ground) {
            warn!("Ignoring resize: {}", e);
            return;
        }
        self.finish_line.set_position(layout.finish_line.x, layout.finish_line.y);
        self.camera.resize(window);
        self.layout = layout;
        debug!("Session resized to {}x{}", window.x, window.y);
    }

    /// Advance the world by `delta_time` seconds.
    pub fn update(
        &mut self,
        delta_time: f32,
        input: PlayerInput,
        max_enemies: usize,
        rng: &mut impl Rng,
    ) -> Outcome {
        if delta_time <= 0.0 {
            return Outcome::Running;
        }

        let ground_bounds = self.main_ground().bounds();
        self.camera.follow(self.player.entity().x(), ground_bounds);

        self.spawn_enemies(delta_time, max_enemies, rng);

        let finish_x = self.finish_line.center().x;
        let map_width = self.layout.map_size.x;
        for enemy in &mut self.enemies {
            enemy.execute_ai(delta_time, map_width, finish_x, self.player.entity());
        }

        if self.update_world(delta_time, input, rng) == Outcome::GameOver {
            return Outcome::GameOver;
        }

        self.player.update(delta_time);
        let window_height = self.layout.window.y;
        if self.player.entity().y() > window_height {
            self.player.entity_mut().set_y(window_height / 2.0);
        }

        for enemy in &mut self.enemies {
            enemy.update(delta_time);
        }
        Outcome::Running
    }

    fn spawn_enemies(&mut self, delta_time: f32, max_enemies: usize, rng: &mut impl Rng) {
        if self.enemies.len() >= max_enemies {
            return;
        }
        self.spawn_timer += delta_time;
        if self.spawn_timer < self.spawn_interval {
            return;
        }

        let radius = self.textures.enemy_width.unwrap_or(TEXTURE_RESOLUTION) * self.enemy_scale;
        let half_window = self.layout.window.x / 2.0;
        let (x, direction) = if rng.gen_bool(0.5) {
            (self.camera.target.x - half_window - SPAWN_MARGIN, Direction::Right)
        } else {
            (self.camera.target.x + half_window + SPAWN_MARGIN, Direction::Left)
        };
        let y = self.layout.window.y / rng.gen_range(2_u32..=4) as f32;

        match Enemy::new(x, y, radius, self.settings.enemy_speed, direction) {
            Ok(enemy) => {
                debug!("Spawned enemy at ({:.0}, {:.0}) r={:.1}", x, y, radius);
                self.events.spawn.send(SpawnEvent { position: vec2(x, y), radius });
                self.enemies.push(enemy);
            }
            Err(e) => warn!("Enemy spawn skipped: {}", e),
        }

        self.spawn_timer = 0.0;
        self.spawn_interval *= SPAWN_INTERVAL_DECAY;
    }

    fn ramp_difficulty(&mut self, delta_time: f32) {
        self.difficulty_timer += delta_time;
        if self.difficulty_timer < self.settings.difficulty_interval {
            return;
        }
        if self.enemy_scale < MAX_ENEMY_SCALE {
            self.enemy_scale *= DIFFICULTY_STEP;
        } else if self.hardness < MAX_HARDNESS {
            self.hardness *= DIFFICULTY_STEP;
        }
        self.difficulty_timer = 0.0;
        debug!("Difficulty: enemy scale {:.2}, hardness {:.2}", self.enemy_scale, self.hardness);
    }

    /// Player physics, explosions, and every enemy interaction
    fn update_world(&mut self, delta_time: f32, input: PlayerInput, rng: &mut impl Rng) -> Outcome {
        let ground_bounds = self.main_ground().bounds();
        if let Some(position) = self.player.handle_input(delta_time, input, ground_bounds) {
            if self.explosions.create_explosion(position, rng) {
                self.events.explosion.send(ExplosionEvent { position });
            }
        }

        self.ramp_difficulty(delta_time);

        let gravity = self.settings.gravity;
        self.player.entity_mut().apply_gravity(gravity, delta_time);
        resolve_ground_collision(self.player.entity_mut(), &self.grounds, true);

        self.explosions.update(delta_time);

        if self.player.entity().radius() <= TEXTURE_RESOLUTION {
            info!("Game over with {} kills", self.player.kill_count());
            return Outcome::GameOver;
        }

        let window_height = self.layout.window.y;
        let hardness = self.hardness;
        let player = &mut self.player;
        let grounds = &self.grounds;
        let finish_line = &self.finish_line;
        let explosions = &self.explosions;
        let events = &mut self.events;

        self.enemies.retain_mut(|enemy| {
            let bounds = enemy.entity().bounds();
            if explosions.check_damage(bounds.center, bounds.radius) {
                player.increment_kill_count();
                return false;
            }

            enemy.entity_mut().apply_gravity(gravity, delta_time);
            resolve_ground_collision(enemy.entity_mut(), grounds, false);

            if let Some(contact) = resolve_enemy_contact(player, enemy, hardness) {
                events.contact.send(ContactEvent { contact, position: enemy.entity().center() });
                if contact == Contact::Eaten {
                    return false;
                }
            }

            if finish_line.collides_with_circle(&enemy.entity().bounds()) {
                player.shrink_size();
                events.finish.send(FinishEvent { position: enemy.entity().center() });
                return false;
            }

            enemy.entity().y() <= window_height
        });

        Outcome::Running
    }
}
