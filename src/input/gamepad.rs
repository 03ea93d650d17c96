//! Gamepad support
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: No gamepad; every query reports nothing pressed

use macroquad::prelude::Vec2;

// Standard gamepad button indices (Xbox layout)
pub mod button {
    pub const A: u32 = 0;           // South
    pub const B: u32 = 1;           // East
    pub const START: u32 = 9;
    pub const DPAD_UP: u32 = 12;
    pub const DPAD_DOWN: u32 = 13;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

/// Stick deflection below this reads as centered
const DEADZONE: f32 = 0.15;

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Axis, Button as GilrsButton, Gilrs};
    use log::{info, warn};

    pub struct Gamepad {
        /// None when the platform backend failed to start
        gilrs: Option<Gilrs>,
        buttons: u32,
        last_buttons: u32,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(gilrs) => Some(gilrs),
                Err(e) => {
                    warn!("Gamepad support unavailable: {}", e);
                    None
                }
            };
            Self { gilrs, buttons: 0, last_buttons: 0 }
        }

        /// Call once per frame before querying buttons
        pub fn poll(&mut self) {
            let Some(gilrs) = self.gilrs.as_mut() else { return };
            while let Some(event) = gilrs.next_event() {
                match event.event {
                    gilrs::EventType::Connected => info!("Gamepad {:?} connected", event.id),
                    gilrs::EventType::Disconnected => info!("Gamepad {:?} disconnected", event.id),
                    _ => {}
                }
            }
            self.last_buttons = self.buttons;
            self.buttons = self.read_button_mask();
        }

        pub fn has_gamepad(&self) -> bool {
            self.gilrs.as_ref().is_some_and(|g| g.gamepads().next().is_some())
        }

        fn active_gamepad(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        fn read_button_mask(&self) -> u32 {
            let Some(gp) = self.active_gamepad() else { return 0 };
            let mut mask = 0u32;

            if gp.is_pressed(GilrsButton::South) { mask |= 1 << button::A; }
            if gp.is_pressed(GilrsButton::East) { mask |= 1 << button::B; }
            if gp.is_pressed(GilrsButton::Start) { mask |= 1 << button::START; }
            if gp.is_pressed(GilrsButton::DPadUp) { mask |= 1 << button::DPAD_UP; }
            if gp.is_pressed(GilrsButton::DPadDown) { mask |= 1 << button::DPAD_DOWN; }
            if gp.is_pressed(GilrsButton::DPadLeft) { mask |= 1 << button::DPAD_LEFT; }
            if gp.is_pressed(GilrsButton::DPadRight) { mask |= 1 << button::DPAD_RIGHT; }

            mask
        }

        pub fn is_button_down(&self, button: u32) -> bool {
            (self.buttons & (1 << button)) != 0
        }

        /// True only on the poll where the button went down
        pub fn is_button_pressed(&self, button: u32) -> bool {
            super::just_pressed(self.buttons, self.last_buttons, button)
        }

        pub fn left_stick(&self) -> Vec2 {
            let Some(gp) = self.active_gamepad() else { return Vec2::ZERO };
            let x = gp.value(Axis::LeftStickX);
            let y = -gp.value(Axis::LeftStickY); // Screen space: down is positive
            apply_deadzone(x, y, DEADZONE)
        }
    }
}

// ============================================================================
// WASM Implementation (no gamepad)
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn is_button_down(&self, _button: u32) -> bool {
            false
        }

        pub fn is_button_pressed(&self, _button: u32) -> bool {
            false
        }

        pub fn left_stick(&self) -> Vec2 {
            Vec2::ZERO
        }
    }
}

impl Default for Gamepad {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Shared utilities
// ============================================================================

fn just_pressed(current: u32, last: u32, button: u32) -> bool {
    let bit = 1 << button;
    current & bit != 0 && last & bit == 0
}

/// Apply radial deadzone with linear rescaling
fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let len = (x * x + y * y).sqrt();
    if len < deadzone {
        return Vec2::ZERO;
    }
    // Rescale from deadzone..1.0 to 0.0..1.0
    let scale = (len - deadzone) / (1.0 - deadzone) / len;
    Vec2::new(x * scale, y * scale)
}

// Re-export the platform-specific implementation
pub use platform::Gamepad;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadzone() {
        assert_eq!(apply_deadzone(0.1, 0.0, DEADZONE), Vec2::ZERO);
        let full = apply_deadzone(1.0, 0.0, DEADZONE);
        assert!((full.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_just_pressed_edge() {
        let a = 1 << button::A;
        assert!(just_pressed(a, 0, button::A));
        assert!(!just_pressed(a, a, button::A));
        assert!(!just_pressed(0, a, button::A));
    }
}
