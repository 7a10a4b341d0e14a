use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HazardKind {
    Snake = 0,
    Spider = 1,
    Mummy = 2,
    Fire = 3,
    Collapse = 4,
}

impl HazardKind {
    pub const ALL: [HazardKind; 5] = [
        HazardKind::Snake,
        HazardKind::Spider,
        HazardKind::Mummy,
        HazardKind::Fire,
        HazardKind::Collapse,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(HazardKind::Snake),
            1 => Some(HazardKind::Spider),
            2 => Some(HazardKind::Mummy),
            3 => Some(HazardKind::Fire),
            4 => Some(HazardKind::Collapse),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            HazardKind::Snake => "Snake",
            HazardKind::Spider => "Spider",
            HazardKind::Mummy => "Mummy",
            HazardKind::Fire => "Fire",
            HazardKind::Collapse => "Collapse",
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sightings per hazard kind during the current round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardTally {
    counts: [u8; 5],
}

impl HazardTally {
    /// The count at which a hazard kind ends the round.
    pub const FATAL_COUNT: u8 = 2;

    pub const fn new() -> Self {
        Self { counts: [0; 5] }
    }

    /// Records a sighting and returns the new count for that kind.
    pub fn record(&mut self, kind: HazardKind) -> u8 {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_add(1);
        *slot
    }

    pub fn count(&self, kind: HazardKind) -> u8 {
        self.counts[kind.index()]
    }

    pub fn max_count(&self) -> u8 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Number of kinds seen exactly once so far.
    pub fn single_sightings(&self) -> usize {
        self.counts.iter().filter(|&&count| count == 1).count()
    }

    pub fn any_seen(&self) -> bool {
        self.counts.iter().any(|&count| count > 0)
    }

    pub fn reset(&mut self) {
        self.counts = [0; 5];
    }

    pub fn iter(&self) -> impl Iterator<Item = (HazardKind, u8)> + '_ {
        HazardKind::ALL
            .iter()
            .copied()
            .map(|kind| (kind, self.count(kind)))
    }
}
