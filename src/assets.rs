//! Asset loading
//!
//! Every texture and sound is loaded once at startup. A single failure
//! aborts the whole load; whatever was already loaded is dropped with it.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info};
use macroquad::audio::{load_sound, Sound};
use macroquad::prelude::*;

use crate::game::enemy::EnemyFrame;
use crate::game::player::PlayerFrame;

pub const PLAYER_FRAMES: [&str; PlayerFrame::COUNT] =
    ["img/Gobo/Gobo0.png", "img/Gobo/Gobo1.png", "img/Gobo/Gobo2.png"];

pub const ENEMY_FRAMES: [&str; EnemyFrame::COUNT] = [
    "img/Juicy Boy's Brother/Juicy Boy's Brother0.png",
    "img/Juicy Boy's Brother/Juicy Boy's Brother1.png",
    "img/Juicy Boy's Brother/Juicy Boy's Brother2.png",
    "img/Juicy Boy's Brother/Juicy Boy's Brother3.png",
];

pub const GROUND_TEXTURE: &str = "img/Ground.png";
pub const FINISH_LINE_TEXTURE: &str = "img/FinishLine.png";

pub const EXPLOSION_SOUND: &str = "audio/explosion.wav";
pub const LOSE_SOUND: &str = "audio/LoseSound.wav";
pub const HOVER_SOUND: &str = "audio/HoverOnButtonSound.wav";
pub const OPEN_SOUND: &str = "audio/OpenButtonSound.wav";
pub const BACK_SOUND: &str = "audio/BackButtonSound.wav";
pub const NO_SOUND: &str = "audio/NO!.wav";
pub const DISAPPOINTING_SOUND: &str = "audio/Disappointing.wav";
pub const WALK_SOUND: &str = "audio/Gobo's Run Sound.wav";
pub const MUSIC: &str = "audio/music.ogg";

/// Sound formats the native audio backend can decode
pub const SOUND_EXTENSIONS: [&str; 2] = ["wav", "ogg"];

/// Every file the game loads, relative to the assets root. Kept in step
/// with `asset_manifest.txt`, which `cargo xtask check-assets` reads.
pub fn manifest() -> Vec<&'static str> {
    let mut files: Vec<&'static str> = Vec::new();
    files.extend(PLAYER_FRAMES);
    files.extend(ENEMY_FRAMES);
    files.extend([
        GROUND_TEXTURE,
        FINISH_LINE_TEXTURE,
        EXPLOSION_SOUND,
        LOSE_SOUND,
        HOVER_SOUND,
        OPEN_SOUND,
        BACK_SOUND,
        NO_SOUND,
        DISAPPOINTING_SOUND,
        WALK_SOUND,
        MUSIC,
    ]);
    files
}

#[derive(Debug)]
pub enum AssetError {
    Texture { path: PathBuf, message: String },
    Sound { path: PathBuf, message: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Texture { path, message } => {
                write!(f, "failed to load texture {}: {}", path.display(), message)
            }
            AssetError::Sound { path, message } => {
                write!(f, "failed to load sound {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for AssetError {}

/// One-shot sound effects
pub struct SoundEffects {
    pub explosion: Sound,
    pub lose: Sound,
    pub hover: Sound,
    pub open: Sound,
    pub back: Sound,
    pub no: Sound,
    pub disappointing: Sound,
}

pub struct Assets {
    pub player_frames: Vec<Texture2D>,
    pub enemy_frames: Vec<Texture2D>,
    pub ground: Texture2D,
    pub finish_line: Texture2D,
    pub effects: SoundEffects,
    /// Looped while the player walks on the ground
    pub walk: Sound,
    pub music: Sound,
}

async fn texture(root: &Path, relative: &str) -> Result<Texture2D, AssetError> {
    let path = root.join(relative);
    let texture = load_texture(&path.to_string_lossy())
        .await
        .map_err(|e| AssetError::Texture { path: path.clone(), message: e.to_string() })?;
    // Pixel art
    texture.set_filter(FilterMode::Nearest);
    debug!("Loaded {}", path.display());
    Ok(texture)
}

async fn textures(root: &Path, relatives: &[&str]) -> Result<Vec<Texture2D>, AssetError> {
    let mut loaded = Vec::with_capacity(relatives.len());
    for relative in relatives {
        loaded.push(texture(root, relative).await?);
    }
    Ok(loaded)
}

/// Reject formats `load_sound` would panic on instead of failing
fn check_sound_format(path: &Path) -> Result<(), AssetError> {
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match extension {
        Some(ext) if SOUND_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(AssetError::Sound {
            path: path.to_path_buf(),
            message: format!("unsupported format, expected one of {:?}", SOUND_EXTENSIONS),
        }),
    }
}

async fn sound(root: &Path, relative: &str) -> Result<Sound, AssetError> {
    let path = root.join(relative);
    check_sound_format(&path)?;
    let sound = load_sound(&path.to_string_lossy())
        .await
        .map_err(|e| AssetError::Sound { path: path.clone(), message: e.to_string() })?;
    debug!("Loaded {}", path.display());
    Ok(sound)
}

impl Assets {
    /// Load everything under `root`, failing on the first missing file
    pub async fn load(root: &Path) -> Result<Self, AssetError> {
        let player_frames = textures(root, &PLAYER_FRAMES).await?;
        let enemy_frames = textures(root, &ENEMY_FRAMES).await?;
        let ground = texture(root, GROUND_TEXTURE).await?;
        let finish_line = texture(root, FINISH_LINE_TEXTURE).await?;

        let effects = SoundEffects {
            explosion: sound(root, EXPLOSION_SOUND).await?,
            lose: sound(root, LOSE_SOUND).await?,
            hover: sound(root, HOVER_SOUND).await?,
            open: sound(root, OPEN_SOUND).await?,
            back: sound(root, BACK_SOUND).await?,
            no: sound(root, NO_SOUND).await?,
            disappointing: sound(root, DISAPPOINTING_SOUND).await?,
        };
        let walk = sound(root, WALK_SOUND).await?;
        let music = sound(root, MUSIC).await?;

        info!("Loaded {} assets from {}", manifest().len(), root.display());
        Ok(Self { player_frames, enemy_frames, ground, finish_line, effects, walk, music })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_lists_every_file_once() {
        let files = manifest();
        assert_eq!(files.len(), 3 + 4 + 2 + 9);
        let mut sorted = files.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), files.len());
    }

    #[test]
    fn test_manifest_matches_shared_list() {
        let listed: Vec<&str> = include_str!("../asset_manifest.txt")
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();
        assert_eq!(listed, manifest());
    }

    #[test]
    fn test_sounds_use_decodable_formats() {
        let sounds = manifest().into_iter().filter(|f| f.starts_with("audio/"));
        for relative in sounds {
            assert!(check_sound_format(Path::new(relative)).is_ok(), "{relative} cannot be decoded");
        }
        assert!(check_sound_format(Path::new("audio/music.mp3")).is_err());
        assert!(check_sound_format(Path::new("audio/music")).is_err());
        assert!(check_sound_format(Path::new("audio/Music.OGG")).is_ok());
    }

    #[test]
    fn test_error_names_path() {
        let err = AssetError::Texture { path: PathBuf::from("assets/img/Ground.png"), message: "nope".into() };
        assert!(err.to_string().contains("assets/img/Ground.png"));
    }
}
