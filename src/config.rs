//! Run-time settings and their defaults.

use std::path::PathBuf;

use anyhow::{bail, Result};

/// Tunables for a run of the game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Enemies created at the start of every session.
    pub enemy_count: usize,
    /// When false, kills are not replaced and clearing the field wins.
    pub respawn: bool,
    /// Target frame rate of the main loop.
    pub fps: u32,
    pub score_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            enemy_count: 6,
            respawn: true,
            fps: 60,
            score_file: default_score_file(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.enemy_count == 0 {
            bail!("enemy count must be at least 1");
        }
        if self.fps == 0 {
            bail!("frame rate must be at least 1");
        }
        Ok(())
    }
}

/// `$HOME/.space_shooter_score`, or the working directory when HOME is unset.
pub fn default_score_file() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".space_shooter_score")
}
