//! Game Module
//!
//! The playable world: circle-bodied characters falling onto a ground
//! strip, enemies racing for the finish line, and the player's bombs.
//!
//! Key pieces:
//! - Entity: circular physics body shared by the player and enemies
//! - Session: one run of the game, owning every world object
//! - Events: what happened during an update, drained by the app for sounds
//! - Renderer: draws a session through its camera

// Shape and explosion APIs are wider than what the session uses
#![allow(dead_code)]

pub mod geometry;
pub mod entity;
pub mod player;
pub mod enemy;
pub mod surface;
pub mod ground;
pub mod finish_line;
pub mod collision;
pub mod particles;
pub mod event;
pub mod layout;
pub mod camera;
pub mod session;
pub mod renderer;

pub use entity::Entity;
pub use event::Events;
pub use player::PlayerInput;
pub use renderer::{draw_session, Sprites};
pub use session::{Outcome, Session, SessionError, SessionSettings, WorldTextures};
