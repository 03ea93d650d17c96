//! Game configuration
//!
//! Read once at startup from `<config dir>/play-as-gobo/config.ron`. A
//! missing file means defaults; any field left out of the file keeps its
//! default as well.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::game::particles::{validate_max_explosions, ExplosionError};
use crate::game::SessionSettings;

const CONFIG_DIR: &str = "play-as-gobo";
const CONFIG_FILE: &str = "config.ron";

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    Explosion(ExplosionError),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl From<ExplosionError> for ConfigError {
    fn from(e: ExplosionError) -> Self {
        ConfigError::Explosion(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::Explosion(e) => write!(f, "Explosion settings: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    Fps30,
    #[default]
    Fps60,
    /// As fast as possible
    Unlocked,
}

impl FpsLimit {
    /// Get the target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window_width: i32,
    pub window_height: i32,
    pub fps_limit: FpsLimit,
    /// Directory holding `img/` and `audio/`
    pub assets_root: PathBuf,
    /// Seconds the farewell sound gets before the window closes
    pub exit_grace: f32,
    pub session: SessionSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 854,
            window_height: 480,
            fps_limit: FpsLimit::default(),
            assets_root: PathBuf::from("assets"),
            exit_grace: 1.5,
            session: SessionSettings::default(),
        }
    }
}

fn ensure(ok: bool, message: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(message()))
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl GameConfig {
    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config = Self::from_ron(&contents)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Like `load`, but writes the defaults to `path` when no file exists
    /// yet so there is something to edit. A failed write is only a warning.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        let config = Self::default();
        match config.save(path) {
            Ok(()) => info!("Wrote default config to {}", path.display()),
            Err(e) => warn!("Could not write default config to {}: {}", path.display(), e),
        }
        Ok(config)
    }

    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let pretty = ron::ser::PrettyConfig::new().depth_limit(3).indentor("  ".to_string());
        fs::write(path, ron::ser::to_string_pretty(self, pretty)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.window_width > 0 && self.window_height > 0, || {
            format!("window size {}x{} must be positive", self.window_width, self.window_height)
        })?;
        ensure(self.exit_grace.is_finite() && self.exit_grace >= 0.0, || {
            format!("exit_grace {} must be zero or more", self.exit_grace)
        })?;

        let s = &self.session;
        ensure(s.gravity.is_finite() && s.gravity >= 0.0, || format!("gravity {} must be zero or more", s.gravity))?;
        ensure(positive(s.player_speed), || format!("player_speed {} must be positive", s.player_speed))?;
        ensure(positive(s.enemy_speed), || format!("enemy_speed {} must be positive", s.enemy_speed))?;
        ensure(positive(s.initial_spawn_interval), || {
            format!("initial_spawn_interval {} must be positive", s.initial_spawn_interval)
        })?;
        ensure(positive(s.difficulty_interval), || {
            format!("difficulty_interval {} must be positive", s.difficulty_interval)
        })?;
        validate_max_explosions(s.max_explosions)?;
        s.explosion.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load(dir.path().join("absent.ron")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_first_launch_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("play-as-gobo").join("config.ron");
        assert_eq!(GameConfig::load_or_create(&path).unwrap(), GameConfig::default());
        assert!(path.is_file());

        fs::write(&path, "(window_width: 1024)").unwrap();
        assert_eq!(GameConfig::load_or_create(&path).unwrap().window_width, 1024);
    }

    #[test]
    fn test_unwritable_location_still_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();
        let config = GameConfig::load_or_create(blocker.join("config.ron")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = GameConfig::from_ron("(window_width: 1280, session: (gravity: 500.0))").unwrap();
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.window_height, 480);
        assert_eq!(config.session.gravity, 500.0);
        assert_eq!(config.session.enemy_speed, SessionSettings::default().enemy_speed);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ron");
        let mut config = GameConfig::default();
        config.fps_limit = FpsLimit::Unlocked;
        config.exit_grace = 0.5;
        config.save(&path).unwrap();
        assert_eq!(GameConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            GameConfig::from_ron("(window_width: 0)"),
            Err(ConfigError::ValidationError(_))
        ));
        assert!(matches!(
            GameConfig::from_ron("(session: (max_explosions: 0))"),
            Err(ConfigError::Explosion(ExplosionError::MaxExplosionsOutOfRange(0)))
        ));
        assert!(matches!(
            GameConfig::from_ron("(session: (explosion: (duration: 50.0)))"),
            Err(ConfigError::Explosion(ExplosionError::DurationOutOfRange(_)))
        ));
        assert!(matches!(GameConfig::from_ron("(window_width: \"wide\")"), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_fps_limit_frame_time() {
        assert_eq!(FpsLimit::Fps30.frame_time(), Some(1.0 / 30.0));
        assert_eq!(FpsLimit::Unlocked.frame_time(), None);
    }
}
