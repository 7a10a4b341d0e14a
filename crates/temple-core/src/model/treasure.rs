use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TreasureKind {
    Turquoise = 0,
    Obsidian = 1,
    Gold = 2,
}

impl TreasureKind {
    pub const ALL: [TreasureKind; 3] = [
        TreasureKind::Turquoise,
        TreasureKind::Obsidian,
        TreasureKind::Gold,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Points a single gem of this kind is worth at final scoring.
    pub const fn value(self) -> u32 {
        match self {
            TreasureKind::Turquoise => 1,
            TreasureKind::Obsidian => 5,
            TreasureKind::Gold => 10,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TreasureKind::Turquoise => "Turquoise",
            TreasureKind::Obsidian => "Obsidian",
            TreasureKind::Gold => "Gold",
        }
    }
}

impl fmt::Display for TreasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gem counts keyed by [`TreasureKind`]; every kind is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasureStore {
    counts: [u32; 3],
}

impl TreasureStore {
    pub const fn new() -> Self {
        Self { counts: [0; 3] }
    }

    pub fn add(&mut self, kind: TreasureKind, amount: u32) {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_add(amount);
    }

    pub fn count(&self, kind: TreasureKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn value(&self) -> u32 {
        TreasureKind::ALL
            .iter()
            .map(|kind| self.count(*kind) * kind.value())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    pub fn clear(&mut self) {
        self.counts = [0; 3];
    }

    /// Adds every count from `other` into `self` and zeroes `other`.
    pub fn drain_into(&mut self, other: &mut TreasureStore) {
        for kind in TreasureKind::ALL.iter().copied() {
            other.add(kind, self.count(kind));
        }
        self.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (TreasureKind, u32)> + '_ {
        TreasureKind::ALL
            .iter()
            .copied()
            .map(|kind| (kind, self.count(kind)))
    }
}
