//! Game action definitions

/// All actions the game reads from the keyboard or a gamepad
///
/// Button mappings (Xbox/PlayStation):
/// - A/X = Confirm / Bomb
/// - B/O or Start = Back
/// - D-pad / left stick = Navigate / Move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (held)
    MoveLeft,
    MoveRight,

    // Menu navigation (pressed)
    NavigateUp,
    NavigateDown,
    NavigateLeft,
    NavigateRight,
    Confirm,
    Back,

    // Gameplay
    Bomb,
}
