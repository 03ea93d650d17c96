//! Input state management
//!
//! Polls both keyboard (macroquad) and gamepad input, combining them into
//! the per-frame snapshots the menus and the player consume.

use macroquad::prelude::*;

use super::gamepad::{button, Gamepad};
use super::Action;
use crate::game::PlayerInput;
use crate::menu::MenuInput;

/// Horizontal stick deflection that counts as holding a direction
const STICK_MOVE_THRESHOLD: f32 = 0.5;

/// Unified input state that handles both keyboard and gamepad
pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        Self { gamepad: Gamepad::new() }
    }

    /// Call once per frame before checking actions
    pub fn poll(&mut self) {
        self.gamepad.poll();
    }

    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        self.keyboard_down(action) || self.gamepad_down(action)
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        self.keyboard_pressed(action) || self.gamepad_pressed(action)
    }

    fn keyboard_down(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            Action::MoveRight => is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
            _ => false,
        }
    }

    fn gamepad_down(&self, action: Action) -> bool {
        let stick_x = self.gamepad.left_stick().x;
        match action {
            Action::MoveLeft => {
                self.gamepad.is_button_down(button::DPAD_LEFT) || stick_x < -STICK_MOVE_THRESHOLD
            }
            Action::MoveRight => {
                self.gamepad.is_button_down(button::DPAD_RIGHT) || stick_x > STICK_MOVE_THRESHOLD
            }
            _ => false,
        }
    }

    fn keyboard_pressed(&self, action: Action) -> bool {
        match action {
            Action::NavigateUp => is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W),
            Action::NavigateDown => is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S),
            Action::NavigateLeft => is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A),
            Action::NavigateRight => is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D),
            Action::Confirm => {
                is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) || is_key_pressed(KeyCode::Space)
            }
            Action::Back => is_key_pressed(KeyCode::Escape),
            Action::Bomb => is_key_pressed(KeyCode::Space),
            _ => false,
        }
    }

    fn gamepad_pressed(&self, action: Action) -> bool {
        match action {
            Action::NavigateUp => self.gamepad.is_button_pressed(button::DPAD_UP),
            Action::NavigateDown => self.gamepad.is_button_pressed(button::DPAD_DOWN),
            Action::NavigateLeft => self.gamepad.is_button_pressed(button::DPAD_LEFT),
            Action::NavigateRight => self.gamepad.is_button_pressed(button::DPAD_RIGHT),
            Action::Confirm | Action::Bomb => self.gamepad.is_button_pressed(button::A),
            Action::Back => {
                self.gamepad.is_button_pressed(button::B) || self.gamepad.is_button_pressed(button::START)
            }
            _ => false,
        }
    }

    /// Discrete menu presses for this frame
    pub fn menu_input(&self) -> MenuInput {
        MenuInput {
            up: self.action_pressed(Action::NavigateUp),
            down: self.action_pressed(Action::NavigateDown),
            left: self.action_pressed(Action::NavigateLeft),
            right: self.action_pressed(Action::NavigateRight),
            confirm: self.action_pressed(Action::Confirm),
            back: self.action_pressed(Action::Back),
        }
    }

    /// Movement and bomb controls for this frame
    pub fn player_input(&self) -> PlayerInput {
        PlayerInput {
            left: self.action_down(Action::MoveLeft),
            right: self.action_down(Action::MoveRight),
            bomb: self.action_pressed(Action::Bomb),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
