use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use temple_core::game::interface::LeaderboardStore;
use temple_core::game::leaderboard::{Leaderboard, LeaderboardError};
use tracing::debug;

/// Leaderboard kept as a pretty-printed JSON list on disk. A missing file reads
/// as an empty board.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    max_entries: usize,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeaderboardStore for JsonFileStore {
    fn load(&self) -> Result<Leaderboard, LeaderboardError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    target: "temple_app::store",
                    path = %self.path.display(),
                    "no leaderboard yet"
                );
                return Ok(Leaderboard::new());
            }
            Err(err) => return Err(err.into()),
        };
        if json.trim().is_empty() {
            return Ok(Leaderboard::new());
        }
        Ok(Leaderboard::from_json(&json)?)
    }

    fn save(&mut self, leaderboard: &Leaderboard) -> Result<(), LeaderboardError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = leaderboard.to_json_pretty()?;
        fs::write(&self.path, json)?;
        debug!(
            target: "temple_app::store",
            path = %self.path.display(),
            entries = leaderboard.entries().len(),
            "leaderboard saved"
        );
        Ok(())
    }

    fn max_entries(&self) -> usize {
        self.max_entries
    }
}
