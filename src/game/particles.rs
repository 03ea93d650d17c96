//! Particle System
//!
//! Bomb explosions: an expanding damage disc plus a burst of particles that
//! fall, slow down and fade white → yellow → orange → red → maroon.
//! Explosions live in a capped pool; finished slots are restarted before
//! anything new is allocated.

use std::f32::consts::TAU;
use std::fmt;

use log::warn;
use macroquad::prelude::*;
use ::rand::Rng;
use serde::{Deserialize, Serialize};

pub const MIN_DURATION: f32 = 0.1;
pub const MAX_DURATION: f32 = 10.0;
pub const MIN_BLAST_RADIUS: f32 = 1.0;
pub const MAX_BLAST_RADIUS: f32 = 1000.0;
pub const MIN_PARTICLE_COUNT: usize = 5;
pub const MAX_PARTICLE_COUNT: usize = 100;
pub const MIN_MAX_EXPLOSIONS: usize = 1;
pub const MAX_MAX_EXPLOSIONS: usize = 500;
pub const DEFAULT_MAX_EXPLOSIONS: usize = 50;

const ANGLE_JITTER: f32 = 0.2;
const MIN_PARTICLE_SPEED: f32 = 100.0;
const MAX_PARTICLE_SPEED: f32 = 250.0;
const MIN_PARTICLE_LIFE: f32 = 0.8;
const MAX_PARTICLE_LIFE: f32 = 1.5;
const MIN_PARTICLE_SIZE: f32 = 3.0;
const MAX_PARTICLE_SIZE: f32 = 8.0;
const PARTICLE_GRAVITY: f32 = 200.0;
/// Per-update velocity multiplier
const AIR_RESISTANCE: f32 = 0.98;
/// The white inner flash lasts this long
const FLASH_DURATION: f32 = 0.3;
const CORE_COLOR: Color = Color::new(1.0, 100.0 / 255.0, 0.0, 1.0);

/// Error type for explosion tuning
#[derive(Debug, Clone, PartialEq)]
pub enum ExplosionError {
    DurationOutOfRange(f32),
    RadiusOutOfRange(f32),
    ParticleCountOutOfRange(usize),
    MaxExplosionsOutOfRange(usize),
}

impl fmt::Display for ExplosionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplosionError::DurationOutOfRange(d) => write!(
                f,
                "explosion duration {} must be between {} and {} seconds",
                d, MIN_DURATION, MAX_DURATION
            ),
            ExplosionError::RadiusOutOfRange(r) => write!(
                f,
                "explosion radius {} must be between {} and {}",
                r, MIN_BLAST_RADIUS, MAX_BLAST_RADIUS
            ),
            ExplosionError::ParticleCountOutOfRange(n) => write!(
                f,
                "particle count {} must be between {} and {}",
                n, MIN_PARTICLE_COUNT, MAX_PARTICLE_COUNT
            ),
            ExplosionError::MaxExplosionsOutOfRange(n) => write!(
                f,
                "max explosions {} must be between {} and {}",
                n, MIN_MAX_EXPLOSIONS, MAX_MAX_EXPLOSIONS
            ),
        }
    }
}

impl std::error::Error for ExplosionError {}

/// Tuning shared by every explosion in a pool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionSettings {
    /// Seconds until the explosion deactivates
    pub duration: f32,
    /// Blast radius reached at the end of the duration
    pub max_radius: f32,
    pub particle_count: usize,
}

impl Default for ExplosionSettings {
    fn default() -> Self {
        Self { duration: 1.5, max_radius: 80.0, particle_count: 30 }
    }
}

impl ExplosionSettings {
    pub fn validate(&self) -> Result<(), ExplosionError> {
        validate_duration(self.duration)?;
        validate_radius(self.max_radius)?;
        validate_particle_count(self.particle_count)
    }
}

fn validate_duration(duration: f32) -> Result<(), ExplosionError> {
    if (MIN_DURATION..=MAX_DURATION).contains(&duration) {
        Ok(())
    } else {
        Err(ExplosionError::DurationOutOfRange(duration))
    }
}

fn validate_radius(radius: f32) -> Result<(), ExplosionError> {
    if (MIN_BLAST_RADIUS..=MAX_BLAST_RADIUS).contains(&radius) {
        Ok(())
    } else {
        Err(ExplosionError::RadiusOutOfRange(radius))
    }
}

fn validate_particle_count(count: usize) -> Result<(), ExplosionError> {
    if (MIN_PARTICLE_COUNT..=MAX_PARTICLE_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(ExplosionError::ParticleCountOutOfRange(count))
    }
}

/// Color for a particle with `life_ratio` of its life remaining
pub fn particle_color(life_ratio: f32) -> Color {
    let base = if life_ratio > 0.8 {
        WHITE
    } else if life_ratio > 0.6 {
        YELLOW
    } else if life_ratio > 0.4 {
        ORANGE
    } else if life_ratio > 0.2 {
        RED
    } else {
        MAROON
    };
    Color { a: life_ratio, ..base }
}

/// A single particle
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec2,
    /// Units per second
    pub velocity: Vec2,
    /// Remaining life in seconds
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub initial_size: f32,
    pub color: Color,
}

impl Particle {
    fn new(position: Vec2, velocity: Vec2, life: f32, size: f32) -> Self {
        Self {
            position,
            velocity,
            life,
            max_life: life,
            size,
            initial_size: size,
            color: WHITE,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    fn update(&mut self, delta_time: f32) {
        if !self.is_alive() {
            return;
        }
        self.position += self.velocity * delta_time;
        self.velocity.y += PARTICLE_GRAVITY * delta_time;
        self.velocity *= AIR_RESISTANCE;
        self.life -= delta_time;

        let ratio = (self.life / self.max_life).max(0.0);
        self.color = particle_color(ratio);
        self.size = self.initial_size * ratio;
    }
}

/// One expanding blast and its particles
#[derive(Debug, Clone)]
pub struct Explosion {
    position: Vec2,
    particles: Vec<Particle>,
    active: bool,
    timer: f32,
    settings: ExplosionSettings,
}

impl Explosion {
    pub fn new(settings: ExplosionSettings) -> Result<Self, ExplosionError> {
        settings.validate()?;
        Ok(Self {
            position: Vec2::ZERO,
            particles: Vec::with_capacity(settings.particle_count),
            active: false,
            timer: 0.0,
            settings,
        })
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn settings(&self) -> ExplosionSettings {
        self.settings
    }

    /// (Re)start the blast at `position` with a fresh particle ring
    pub fn start(&mut self, position: Vec2, rng: &mut impl Rng) {
        self.position = position;
        self.timer = 0.0;
        self.active = true;
        self.create_particles(rng);
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.active = false;
        self.particles.clear();
    }

    fn create_particles(&mut self, rng: &mut impl Rng) {
        let count = self.settings.particle_count;
        let angle_step = TAU / count as f32;
        let origin = self.position;
        self.particles.clear();
        self.particles.extend((0..count).map(|i| {
            let angle = i as f32 * angle_step + rng.gen_range(-ANGLE_JITTER..=ANGLE_JITTER);
            let speed = rng.gen_range(MIN_PARTICLE_SPEED..=MAX_PARTICLE_SPEED);
            let life = rng.gen_range(MIN_PARTICLE_LIFE..=MAX_PARTICLE_LIFE);
            let size = rng.gen_range(MIN_PARTICLE_SIZE..=MAX_PARTICLE_SIZE);
            let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;
            Particle::new(origin, velocity, life, size)
        }));
    }

    pub fn update(&mut self, delta_time: f32) {
        if !self.active || delta_time <= 0.0 {
            return;
        }
        self.timer += delta_time;
        for particle in &mut self.particles {
            particle.update(delta_time);
        }
        if self.timer >= self.settings.duration {
            self.active = false;
        }
    }

    /// 0..1 through the blast; 1 once finished
    pub fn progress(&self) -> f32 {
        if !self.active {
            return 1.0;
        }
        (self.timer / self.settings.duration).min(1.0)
    }

    /// Current blast radius; zero when inactive
    pub fn radius(&self) -> f32 {
        if !self.active {
            return 0.0;
        }
        self.progress() * self.settings.max_radius
    }

    pub fn set_duration(&mut self, duration: f32) -> Result<(), ExplosionError> {
        validate_duration(duration)?;
        self.settings.duration = duration;
        Ok(())
    }

    pub fn set_max_radius(&mut self, radius: f32) -> Result<(), ExplosionError> {
        validate_radius(radius)?;
        self.settings.max_radius = radius;
        Ok(())
    }

    pub fn set_particle_count(&mut self, count: usize) -> Result<(), ExplosionError> {
        validate_particle_count(count)?;
        self.settings.particle_count = count;
        self.particles.reserve(count);
        Ok(())
    }

    pub fn draw(&self) {
        if !self.active {
            return;
        }
        let radius = self.radius();
        let core = Color { a: 1.0 - self.progress(), ..CORE_COLOR };
        draw_circle(self.position.x, self.position.y, radius, core);

        if self.timer < FLASH_DURATION {
            let flash = Color { a: 1.0 - self.timer / FLASH_DURATION, ..WHITE };
            draw_circle(self.position.x, self.position.y, radius * 0.5, flash);
        }

        for p in self.particles.iter().filter(|p| p.is_alive()) {
            draw_circle(p.position.x, p.position.y, p.size, p.color);
        }
    }
}

/// Capped pool of explosions
pub struct ExplosionManager {
    explosions: Vec<Explosion>,
    max_explosions: usize,
    settings: ExplosionSettings,
}

impl ExplosionManager {
    pub fn new() -> Self {
        Self {
            explosions: Vec::new(),
            max_explosions: DEFAULT_MAX_EXPLOSIONS,
            settings: ExplosionSettings::default(),
        }
    }

    pub fn with_settings(max_explosions: usize, settings: ExplosionSettings) -> Result<Self, ExplosionError> {
        validate_max_explosions(max_explosions)?;
        settings.validate()?;
        Ok(Self { explosions: Vec::new(), max_explosions, settings })
    }

    pub fn max_explosions(&self) -> usize {
        self.max_explosions
    }

    /// Start a blast at `position`. Returns false when the pool is full of
    /// live explosions and the request was dropped.
    pub fn create_explosion(&mut self, position: Vec2, rng: &mut impl Rng) -> bool {
        if let Some(idle) = self.explosions.iter_mut().find(|e| !e.is_active()) {
            idle.start(position, rng);
            return true;
        }

        if self.explosions.len() >= self.max_explosions {
            self.cleanup_inactive();
        }
        if self.explosions.len() >= self.max_explosions {
            warn!(
                "Max explosion limit ({}) reached, skipping explosion",
                self.max_explosions
            );
            return false;
        }

        // Settings were validated on construction
        let mut explosion = Explosion {
            position,
            particles: Vec::with_capacity(self.settings.particle_count),
            active: false,
            timer: 0.0,
            settings: self.settings,
        };
        explosion.start(position, rng);
        self.explosions.push(explosion);
        true
    }

    fn cleanup_inactive(&mut self) {
        self.explosions.retain(|e| e.is_active());
    }

    pub fn update(&mut self, delta_time: f32) {
        if delta_time <= 0.0 {
            return;
        }
        for explosion in &mut self.explosions {
            explosion.update(delta_time);
        }
    }

    pub fn draw(&self) {
        for explosion in &self.explosions {
            explosion.draw();
        }
    }

    pub fn clear(&mut self) {
        self.explosions.clear();
    }

    /// Any live blast reaches a circle at `position` with `radius`
    pub fn check_damage(&self, position: Vec2, radius: f32) -> bool {
        self.explosions
            .iter()
            .filter(|e| e.is_active())
            .any(|e| e.position().distance(position) < e.radius() + radius)
    }

    pub fn active_positions(&self) -> Vec<Vec2> {
        self.explosions.iter().filter(|e| e.is_active()).map(|e| e.position()).collect()
    }

    pub fn active_count(&self) -> usize {
        self.explosions.iter().filter(|e| e.is_active()).count()
    }

    pub fn total_count(&self) -> usize {
        self.explosions.len()
    }

    pub fn has_active(&self) -> bool {
        self.explosions.iter().any(|e| e.is_active())
    }

    /// Change the pool cap, dropping finished explosions and then the oldest
    pub fn set_max_explosions(&mut self, max: usize) -> Result<(), ExplosionError> {
        validate_max_explosions(max)?;
        self.max_explosions = max;
        if self.explosions.len() > max {
            self.cleanup_inactive();
            if self.explosions.len() > max {
                let excess = self.explosions.len() - max;
                self.explosions.drain(..excess);
            }
        }
        Ok(())
    }

    pub fn reserve(&mut self, count: usize) {
        if count <= self.max_explosions {
            self.explosions.reserve(count);
        }
    }
}

impl Default for ExplosionManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate_max_explosions(max: usize) -> Result<(), ExplosionError> {
    if (MIN_MAX_EXPLOSIONS..=MAX_MAX_EXPLOSIONS).contains(&max) {
        Ok(())
    } else {
        Err(ExplosionError::MaxExplosionsOutOfRange(max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::rngs::StdRng;
    use ::rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_settings_validation() {
        assert!(ExplosionSettings::default().validate().is_ok());
        let bad = ExplosionSettings { duration: 0.05, ..Default::default() };
        assert_eq!(bad.validate(), Err(ExplosionError::DurationOutOfRange(0.05)));
        let bad = ExplosionSettings { max_radius: 1001.0, ..Default::default() };
        assert!(bad.validate().is_err());
        let bad = ExplosionSettings { particle_count: 4, ..Default::default() };
        assert!(bad.validate().is_err());

        let mut e = Explosion::new(ExplosionSettings::default()).unwrap();
        assert!(e.set_particle_count(101).is_err());
        assert_eq!(e.settings().particle_count, 30);
        e.set_duration(10.0).unwrap();
        assert!(e.set_max_radius(0.0).is_err());
    }

    #[test]
    fn test_start_builds_particle_ring() {
        let mut e = Explosion::new(ExplosionSettings::default()).unwrap();
        e.start(Vec2::new(10.0, 20.0), &mut rng());
        assert!(e.is_active());
        assert_eq!(e.particles().len(), 30);
        for p in e.particles() {
            assert_eq!(p.position, Vec2::new(10.0, 20.0));
            let speed = p.velocity.length();
            assert!((MIN_PARTICLE_SPEED - 1e-3..=MAX_PARTICLE_SPEED + 1e-3).contains(&speed));
            assert!((MIN_PARTICLE_LIFE..=MAX_PARTICLE_LIFE).contains(&p.life));
            assert!((MIN_PARTICLE_SIZE..=MAX_PARTICLE_SIZE).contains(&p.size));
            assert_eq!(p.color, WHITE);
        }
    }

    #[test]
    fn test_radius_grows_then_deactivates() {
        let mut e = Explosion::new(ExplosionSettings::default()).unwrap();
        assert_eq!(e.radius(), 0.0);
        assert_eq!(e.progress(), 1.0);

        e.start(Vec2::ZERO, &mut rng());
        e.update(0.75);
        assert!((e.radius() - 40.0).abs() < 1e-4);
        assert!((e.progress() - 0.5).abs() < 1e-6);

        e.update(0.0);
        assert!((e.progress() - 0.5).abs() < 1e-6);

        e.update(0.75);
        assert!(!e.is_active());
        assert_eq!(e.radius(), 0.0);
    }

    #[test]
    fn test_particle_alpha_never_increases() {
        let mut e = Explosion::new(ExplosionSettings::default()).unwrap();
        e.start(Vec2::ZERO, &mut rng());
        let mut last: Vec<f32> = e.particles().iter().map(|p| p.color.a).collect();
        for _ in 0..100 {
            e.update(1.0 / 60.0);
            for (p, prev) in e.particles().iter().zip(last.iter_mut()) {
                assert!(p.color.a <= *prev);
                *prev = p.color.a;
            }
        }
    }

    #[test]
    fn test_particle_color_steps() {
        assert_eq!(particle_color(0.9), Color { a: 0.9, ..WHITE });
        assert_eq!(particle_color(0.7), Color { a: 0.7, ..YELLOW });
        assert_eq!(particle_color(0.5), Color { a: 0.5, ..ORANGE });
        assert_eq!(particle_color(0.3), Color { a: 0.3, ..RED });
        assert_eq!(particle_color(0.0), Color { a: 0.0, ..MAROON });
    }

    #[test]
    fn test_particle_physics() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(100.0, 0.0), 1.0, 4.0);
        p.update(0.5);
        assert_eq!(p.position, Vec2::new(50.0, 0.0));
        assert!((p.velocity.x - 98.0).abs() < 1e-4);
        assert!((p.velocity.y - 98.0).abs() < 1e-4);
        assert!((p.size - 2.0).abs() < 1e-6);

        p.update(0.6);
        assert!(!p.is_alive());
        let frozen = p.position;
        p.update(0.5);
        assert_eq!(p.position, frozen);
        assert_eq!(p.size, 0.0);
    }

    #[test]
    fn test_damage_check() {
        let mut pool = ExplosionManager::new();
        pool.create_explosion(Vec2::ZERO, &mut rng());
        pool.update(0.75);
        // Blast radius is 40 here
        assert!(pool.check_damage(Vec2::new(49.0, 0.0), 10.0));
        assert!(!pool.check_damage(Vec2::new(50.0, 0.0), 10.0));

        pool.update(1.0);
        assert!(!pool.check_damage(Vec2::ZERO, 10.0));
    }

    #[test]
    fn test_pool_reuses_inactive_first() {
        let mut pool = ExplosionManager::with_settings(2, ExplosionSettings::default()).unwrap();
        let mut rng = rng();
        assert!(pool.create_explosion(Vec2::ZERO, &mut rng));
        assert!(pool.create_explosion(Vec2::ONE, &mut rng));
        assert!(!pool.create_explosion(Vec2::X, &mut rng));
        assert_eq!(pool.total_count(), 2);

        pool.update(2.0);
        assert!(!pool.has_active());
        assert!(pool.create_explosion(Vec2::new(5.0, 5.0), &mut rng));
        assert_eq!(pool.total_count(), 2);
        assert_eq!(pool.active_count(), 1);
        assert_eq!(pool.active_positions(), vec![Vec2::new(5.0, 5.0)]);
    }

    #[test]
    fn test_set_max_explosions_trims() {
        let mut pool = ExplosionManager::new();
        let mut rng = rng();
        for i in 0..5 {
            pool.create_explosion(Vec2::new(i as f32, 0.0), &mut rng);
        }
        assert!(pool.set_max_explosions(0).is_err());
        assert!(pool.set_max_explosions(501).is_err());

        pool.set_max_explosions(3).unwrap();
        assert_eq!(pool.total_count(), 3);
        // Oldest went first
        assert_eq!(pool.active_positions()[0], Vec2::new(2.0, 0.0));

        pool.clear();
        assert_eq!(pool.total_count(), 0);
    }
}
