//! High-score persistence: one decimal integer in a text file.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// A single decimal integer kept in a plain text file.
#[derive(Clone, Debug)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreStore { path: path.into() }
    }

    /// Stored high score.  A missing, empty or non-numeric file reads as 0.
    pub fn load(&self) -> u32 {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => parse_score(&content).unwrap_or_else(|| {
                tracing::debug!(path = %self.path.display(), "unreadable high score, using 0");
                0
            }),
            Err(_) => 0,
        }
    }

    /// Persist `candidate` if it beats the stored value.  Returns whether
    /// the file was written.  The write is not atomic.
    pub fn save(&self, candidate: u32) -> Result<bool> {
        if candidate <= self.load() {
            return Ok(false);
        }
        std::fs::write(&self.path, candidate.to_string())
            .with_context(|| format!("writing high score to {}", self.path.display()))?;
        tracing::info!(score = candidate, "new high score saved");
        Ok(true)
    }
}

/// Trimmed content must be all ASCII digits and fit in a `u32`.
fn parse_score(content: &str) -> Option<u32> {
    let trimmed = content.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}
