use crate::model::score::Standing;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LEADERBOARD_MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub artifacts: u32,
}

impl From<&Standing> for LeaderboardEntry {
    fn from(value: &Standing) -> Self {
        Self {
            name: value.name.clone(),
            score: value.score,
            artifacts: value.artifacts,
        }
    }
}

/// Best human results, highest score first, artifacts breaking ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<LeaderboardEntry>) -> Self {
        let mut board = Self { entries };
        board.normalize();
        board
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `entry` and returns its 1-based rank, or `None` when it did not
    /// make the cut.
    pub fn record(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        self.record_capped(entry, LEADERBOARD_MAX_ENTRIES)
    }

    /// Like [`Self::record`] but keeps at most `max_entries` rows. The cap never
    /// exceeds [`LEADERBOARD_MAX_ENTRIES`].
    pub fn record_capped(&mut self, entry: LeaderboardEntry, max_entries: usize) -> Option<usize> {
        let cap = max_entries.clamp(1, LEADERBOARD_MAX_ENTRIES);
        // Equal results keep their older rows ahead of the newcomer.
        let key = (entry.score, entry.artifacts);
        let idx = self
            .entries
            .partition_point(|existing| (existing.score, existing.artifacts) >= key);
        let rank = (idx < cap).then(|| {
            self.entries.insert(idx, entry);
            idx + 1
        });
        self.entries.truncate(cap);
        rank
    }

    fn normalize(&mut self) {
        self.entries
            .sort_by(|a, b| (b.score, b.artifacts).cmp(&(a.score, a.artifacts)));
        self.entries.truncate(LEADERBOARD_MAX_ENTRIES);
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let entries: Vec<LeaderboardEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }
}

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("leaderboard I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("leaderboard file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::{LEADERBOARD_MAX_ENTRIES, Leaderboard, LeaderboardEntry};

    fn entry(name: &str, score: u32, artifacts: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            score,
            artifacts,
        }
    }

    #[test]
    fn record_sorts_by_score_then_artifacts() {
        let mut board = Leaderboard::new();
        board.record(entry("a", 30, 0));
        board.record(entry("b", 40, 0));
        let rank = board.record(entry("c", 30, 2));

        assert_eq!(rank, Some(2));
        let names: Vec<_> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
    }

    #[test]
    fn board_keeps_top_ten() {
        let mut board = Leaderboard::new();
        for score in 1..=LEADERBOARD_MAX_ENTRIES as u32 {
            board.record(entry("filler", score * 10, 0));
        }
        assert_eq!(board.record(entry("low", 5, 0)), None);
        assert_eq!(board.record(entry("high", 500, 0)), Some(1));
        assert_eq!(board.entries().len(), LEADERBOARD_MAX_ENTRIES);
        assert!(board.entries().iter().all(|e| e.score != 10));
    }

    #[test]
    fn capped_board_drops_overflow() {
        let mut board = Leaderboard::new();
        board.record_capped(entry("a", 10, 0), 2);
        board.record_capped(entry("b", 20, 0), 2);
        assert_eq!(board.record_capped(entry("c", 5, 0), 2), None);
        assert_eq!(board.record_capped(entry("d", 50, 0), 2), Some(1));
        let names: Vec<_> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["d", "b"]);

        // Larger caps are clamped to the fixed maximum.
        let mut wide = Leaderboard::new();
        for score in 0..20 {
            wide.record_capped(entry("x", score, 0), 50);
        }
        assert_eq!(wide.entries().len(), LEADERBOARD_MAX_ENTRIES);
    }

    #[test]
    fn duplicate_below_the_cut_gets_no_rank() {
        let mut board = Leaderboard::new();
        for score in (20..=100).step_by(10) {
            board.record(entry("filler", score, 0));
        }
        assert_eq!(board.record(entry("Ana", 5, 0)), Some(10));
        assert_eq!(board.record(entry("Ana", 5, 0)), None);
        assert_eq!(board.entries().len(), LEADERBOARD_MAX_ENTRIES);
        assert_eq!(board.entries().iter().filter(|e| e.name == "Ana").count(), 1);
    }

    #[test]
    fn tied_newcomer_ranks_after_older_rows() {
        let mut board = Leaderboard::new();
        board.record(entry("first", 30, 1));
        assert_eq!(board.record(entry("second", 30, 1)), Some(2));
        assert_eq!(board.entries()[0].name, "first");
    }

    #[test]
    fn json_is_a_plain_entry_list() {
        let mut board = Leaderboard::new();
        board.record(entry("Explorer", 43, 5));
        let json = board.to_json_pretty().unwrap();
        assert!(json.trim_start().starts_with('['));

        let restored = Leaderboard::from_json(&json).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn loading_unsorted_json_normalizes() {
        let json = r#"[
            {"name": "low", "score": 3, "artifacts": 0},
            {"name": "high", "score": 9, "artifacts": 1}
        ]"#;
        let board = Leaderboard::from_json(json).unwrap();
        assert_eq!(board.entries()[0].name, "high");
    }
}
