//! UI Theme - Shared colors and sizing constants
//!
//! Centralized color definitions for the menus and HUD.

use macroquad::prelude::Color;

// =============================================================================
// Palette
// =============================================================================

/// Default clear color behind the world
pub const DEFAULT_BACKGROUND: Color = Color::new(0.0, 169.0 / 255.0, 212.0 / 255.0, 1.0);

/// Off-white missing from macroquad's named colors
pub const RAYWHITE: Color = Color::new(245.0 / 255.0, 245.0 / 255.0, 245.0 / 255.0, 1.0);

// =============================================================================
// Overlays
// =============================================================================

/// Opacity of the black layer under the menu screens
pub const MENU_OVERLAY_ALPHA: f32 = 0.8;

/// Game over keeps more of the world visible
pub const GAME_OVER_OVERLAY_ALPHA: f32 = 0.7;

// =============================================================================
// Buttons
// =============================================================================

pub const BUTTON_SELECTED: Color = macroquad::color::LIME;

pub const BUTTON_IDLE: Color = macroquad::color::DARKGRAY;

/// Corner radius as a fraction of the button height
pub const BUTTON_ROUNDNESS: f32 = 0.15;

/// Label height as a fraction of the button height
pub const BUTTON_TEXT_SCALE: f32 = 0.75;

// =============================================================================
// Layout
// =============================================================================

/// Minimum distance between menu content and the window edge
pub const MIN_MARGIN: f32 = 20.0;

/// Shorter side of an option row's arrow buttons never drops below this
pub const MIN_ARROW_SIZE: f32 = 20.0;
