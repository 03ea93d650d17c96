//! Immediate-mode UI helpers for the menus and HUD
//!
//! Design principles:
//! - Immediate mode (no retained state, rebuilt each frame)
//! - Simple rectangle-based layout that scales with the window
//! - Macroquad integration for rendering

pub mod text;
mod theme;
mod widgets;

pub use text::*;
pub use theme::*;
pub use widgets::*;
