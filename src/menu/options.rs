//! Player-adjustable options
//!
//! Lives for the whole process and is never written to disk.

use macroquad::prelude::*;

use crate::ui::{DEFAULT_BACKGROUND, RAYWHITE};

pub const MIN_ENEMIES: usize = 1;
pub const MAX_ENEMIES: usize = 20;
pub const DEFAULT_MAX_ENEMIES: usize = 5;

/// Background colors in cycling order, with their display names
pub const BACKGROUND_COLORS: [(Color, &str); 24] = [
    (DEFAULT_BACKGROUND, "Sky Blue (Default)"),
    (BLACK, "Black"),
    (WHITE, "White"),
    (GREEN, "Green"),
    (BLUE, "Blue"),
    (YELLOW, "Yellow"),
    (ORANGE, "Orange"),
    (PURPLE, "Purple"),
    (BROWN, "Brown"),
    (DARKGRAY, "Dark Gray"),
    (GRAY, "Gray"),
    (LIGHTGRAY, "Light Gray"),
    (PINK, "Pink"),
    (MAGENTA, "Magenta"),
    (DARKGREEN, "Dark Green"),
    (DARKBLUE, "Dark Blue"),
    (DARKPURPLE, "Dark Purple"),
    (DARKBROWN, "Dark Brown"),
    (RAYWHITE, "Ray White"),
    (GOLD, "Gold"),
    (LIME, "Lime"),
    (BEIGE, "Beige"),
    (SKYBLUE, "Sky Blue"),
    (VIOLET, "Violet"),
];

/// Display name for `color`, "Custom" when it is not in the palette
pub fn color_name(color: Color) -> &'static str {
    BACKGROUND_COLORS
        .iter()
        .find(|(c, _)| *c == color)
        .map_or("Custom", |(_, name)| *name)
}

/// One row of the options screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionRow {
    MaxEnemies,
    BackgroundColor,
    Music,
    SoundEffects,
}

impl OptionRow {
    pub const ALL: [OptionRow; 4] =
        [OptionRow::MaxEnemies, OptionRow::BackgroundColor, OptionRow::Music, OptionRow::SoundEffects];

    pub fn label(self) -> &'static str {
        match self {
            OptionRow::MaxEnemies => "Max Enemies:",
            OptionRow::BackgroundColor => "Background Color:",
            OptionRow::Music => "Music:",
            OptionRow::SoundEffects => "Sound Effects:",
        }
    }

    pub fn from_index(i: usize) -> Option<OptionRow> {
        OptionRow::ALL.get(i).copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub max_enemies: usize,
    pub background: Color,
    pub music_enabled: bool,
    pub sound_enabled: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_enemies: DEFAULT_MAX_ENEMIES,
            background: DEFAULT_BACKGROUND,
            music_enabled: true,
            sound_enabled: true,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Palette index of the current background, 0 when it is a custom color
    fn background_index(&self) -> usize {
        BACKGROUND_COLORS.iter().position(|(c, _)| *c == self.background).unwrap_or(0)
    }

    pub fn next_background(&mut self) {
        let next = (self.background_index() + 1) % BACKGROUND_COLORS.len();
        self.background = BACKGROUND_COLORS[next].0;
    }

    pub fn previous_background(&mut self) {
        let len = BACKGROUND_COLORS.len();
        let prev = (self.background_index() + len - 1) % len;
        self.background = BACKGROUND_COLORS[prev].0;
    }

    pub fn background_name(&self) -> &'static str {
        color_name(self.background)
    }

    /// Apply a Left (`forward == false`) or Right press to `row`
    pub fn adjust(&mut self, row: OptionRow, forward: bool) {
        match row {
            OptionRow::MaxEnemies => {
                self.max_enemies = if forward {
                    (self.max_enemies + 1).min(MAX_ENEMIES)
                } else {
                    self.max_enemies.saturating_sub(1).max(MIN_ENEMIES)
                };
            }
            OptionRow::BackgroundColor if forward => self.next_background(),
            OptionRow::BackgroundColor => self.previous_background(),
            OptionRow::Music => self.music_enabled = !self.music_enabled,
            OptionRow::SoundEffects => self.sound_enabled = !self.sound_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_cycle_wraps() {
        let mut options = Options::new();
        options.previous_background();
        assert_eq!(options.background_name(), "Violet");
        options.next_background();
        assert_eq!(options.background_name(), "Sky Blue (Default)");

        for _ in 0..BACKGROUND_COLORS.len() {
            options.next_background();
        }
        assert_eq!(options.background, DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_custom_color_cycles_from_start() {
        let mut options = Options::new();
        options.background = Color::new(0.1, 0.2, 0.3, 1.0);
        assert_eq!(options.background_name(), "Custom");
        options.next_background();
        assert_eq!(options.background_name(), "Black");
    }

    #[test]
    fn test_max_enemies_bounds() {
        let mut options = Options::new();
        for _ in 0..30 {
            options.adjust(OptionRow::MaxEnemies, true);
        }
        assert_eq!(options.max_enemies, MAX_ENEMIES);
        for _ in 0..30 {
            options.adjust(OptionRow::MaxEnemies, false);
        }
        assert_eq!(options.max_enemies, MIN_ENEMIES);
    }

    #[test]
    fn test_toggles() {
        let mut options = Options::new();
        options.adjust(OptionRow::Music, false);
        options.adjust(OptionRow::SoundEffects, true);
        assert!(!options.music_enabled);
        assert!(!options.sound_enabled);
        options.adjust(OptionRow::Music, true);
        assert!(options.music_enabled);
    }

    #[test]
    fn test_palette_names_unique() {
        for (i, (color, name)) in BACKGROUND_COLORS.iter().enumerate() {
            assert_eq!(color_name(*color), *name, "entry {}", i);
        }
    }
}
