use std::path::PathBuf;

use clap::Parser;
use temple_core::game::match_state::clamp_automated_count;

use crate::config::AppConfig;

/// Push your luck through a cursed temple against automated explorers.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "temple",
    version,
    about = "Terminal temple-exploration card game"
)]
pub struct Cli {
    /// Number of automated explorers (1-6).
    #[arg(short, long, value_name = "N")]
    pub players: Option<usize>,

    /// Seed the match RNG for a reproducible expedition.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Path to a YAML configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the leaderboard file location.
    #[arg(long, value_name = "FILE")]
    pub leaderboard: Option<PathBuf>,

    /// Disable ANSI colours.
    #[arg(long)]
    pub no_color: bool,
}

/// A requested automated-player count after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerCount {
    pub requested: usize,
    pub effective: usize,
}

impl PlayerCount {
    pub fn clamp(requested: usize) -> Self {
        Self {
            requested,
            effective: clamp_automated_count(requested),
        }
    }

    pub fn was_clamped(&self) -> bool {
        self.requested != self.effective
    }
}

impl Cli {
    /// Folds command-line overrides into `config`. Returns the clamped player
    /// count when `--players` was out of range so the caller can warn.
    pub fn apply_to(&self, config: &mut AppConfig) -> Option<PlayerCount> {
        let mut clamped = None;
        if let Some(requested) = self.players {
            let count = PlayerCount::clamp(requested);
            if count.was_clamped() {
                clamped = Some(count);
            }
            config.players = count.effective;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(path) = &self.leaderboard {
            config.leaderboard.path = path.clone();
        }
        if self.no_color {
            config.display.color = false;
        }
        clamped
    }
}
