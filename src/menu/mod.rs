//! Menus and the game state machine
//!
//! `state` decides transitions, `options` holds the adjustable settings,
//! `draw` renders each screen.

mod draw;
pub mod options;
pub mod state;

pub use draw::*;
pub use options::Options;
pub use state::{GameState, Menu, MenuCommand, MenuInput, MenuResponse, SoundCue};
