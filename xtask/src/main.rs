//! Build automation tasks for Play As Gobo
//!
//! Usage:
//!   cargo xtask check-assets    # Verify every asset the game loads exists
//!   cargo xtask dist            # Release build bundled with assets/

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const BINARY: &str = "play-as-gobo";

/// Files the game loads at startup, relative to assets/
const MANIFEST: &str = include_str!("../../asset_manifest.txt");

fn assets() -> Vec<&'static str> {
    MANIFEST
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for Play As Gobo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify every asset file exists
    CheckAssets {
        /// Assets directory (defaults to assets/ in the project root)
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Build a native release and bundle it with the assets
    Dist,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAssets { root } => {
            let root = root.unwrap_or_else(|| project_root().join("assets"));
            check_assets(&root)
        }
        Commands::Dist => dist(),
    }
}

/// Get the project root directory
fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap_or(manifest_dir).to_path_buf()
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Copy directory recursively
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Asset paths missing under `root`
fn missing_assets(root: &Path) -> Vec<PathBuf> {
    assets()
        .iter()
        .map(|relative| root.join(relative))
        .filter(|path| !path.is_file())
        .collect()
}

fn check_assets(root: &Path) -> Result<()> {
    let missing = missing_assets(root);
    if missing.is_empty() {
        println!("All {} assets present in {}", assets().len(), root.display());
        return Ok(());
    }
    for path in &missing {
        println!("missing: {}", path.display());
    }
    anyhow::bail!("{} of {} assets missing", missing.len(), assets().len())
}

/// Build a native release into dist/<platform>/
fn dist() -> Result<()> {
    let root = project_root();
    let assets = root.join("assets");
    check_assets(&assets)?;

    let platform = if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "macos") {
        "macos"
    } else {
        "linux"
    };
    let dist = root.join("dist").join(platform);

    println!("Building native release for {}...", platform);

    // Clean and create dist folder
    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--bin", BINARY]),
    )?;

    let binary_name = if platform == "windows" {
        format!("{}.exe", BINARY)
    } else {
        BINARY.to_string()
    };
    std::fs::copy(root.join("target/release").join(&binary_name), dist.join(&binary_name))
        .with_context(|| format!("Failed to copy {}", binary_name))?;

    copy_dir_recursive(&assets, &dist.join("assets"))?;

    println!("Build complete: dist/{}/", platform);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_assets_reported() {
        let dir = tempfile::tempdir().unwrap();
        let total = assets().len();
        assert_eq!(total, 18);
        assert_eq!(missing_assets(dir.path()).len(), total);

        let ground = dir.path().join("img/Ground.png");
        std::fs::create_dir_all(ground.parent().unwrap()).unwrap();
        std::fs::write(&ground, b"png").unwrap();
        assert_eq!(missing_assets(dir.path()).len(), total - 1);
        assert!(check_assets(dir.path()).is_err());
    }
}
