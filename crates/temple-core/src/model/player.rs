use crate::model::score::final_score;
use crate::model::treasure::{TreasureKind, TreasureStore};
use core::fmt;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const RISK_TOLERANCE_RANGE: RangeInclusive<f64> = 0.3..=0.8;

/// Seat index of a participant within a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(usize);

impl PlayerId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    Automated { risk_tolerance: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    id: PlayerId,
    name: String,
    kind: PlayerKind,
    tent: TreasureStore,
    round: TreasureStore,
    artifacts: u32,
    in_temple: bool,
    total_score: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            tent: TreasureStore::new(),
            round: TreasureStore::new(),
            artifacts: 0,
            in_temple: true,
            total_score: 0,
        }
    }

    pub fn human(id: PlayerId, name: impl Into<String>) -> Self {
        Self::new(id, name, PlayerKind::Human)
    }

    /// An automated explorer whose risk tolerance is drawn once from
    /// [`RISK_TOLERANCE_RANGE`].
    pub fn automated<R: Rng + ?Sized>(id: PlayerId, name: impl Into<String>, rng: &mut R) -> Self {
        let risk_tolerance = rng.gen_range(RISK_TOLERANCE_RANGE);
        Self::with_risk_tolerance(id, name, risk_tolerance)
    }

    pub fn with_risk_tolerance(id: PlayerId, name: impl Into<String>, risk_tolerance: f64) -> Self {
        Self::new(id, name, PlayerKind::Automated { risk_tolerance })
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    pub fn risk_tolerance(&self) -> Option<f64> {
        match self.kind {
            PlayerKind::Human => None,
            PlayerKind::Automated { risk_tolerance } => Some(risk_tolerance),
        }
    }

    pub fn tent(&self) -> &TreasureStore {
        &self.tent
    }

    pub fn round_treasures(&self) -> &TreasureStore {
        &self.round
    }

    pub fn artifacts(&self) -> u32 {
        self.artifacts
    }

    pub fn in_temple(&self) -> bool {
        self.in_temple
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn add_round_treasure(&mut self, kind: TreasureKind, amount: u32) {
        self.round.add(kind, amount);
    }

    pub fn add_tent_treasure(&mut self, kind: TreasureKind, amount: u32) {
        self.tent.add(kind, amount);
    }

    /// Banks everything carried this round. A second call is a no-op.
    pub fn move_round_to_tent(&mut self) {
        self.round.drain_into(&mut self.tent);
    }

    pub fn lose_round_treasures(&mut self) {
        self.round.clear();
    }

    pub fn leave_temple(&mut self) {
        self.in_temple = false;
    }

    pub fn award_artifacts(&mut self, count: u32) {
        self.artifacts = self.artifacts.saturating_add(count);
    }

    pub fn reset_for_round(&mut self) {
        self.round.clear();
        self.in_temple = true;
    }

    /// Points at risk this round.
    pub fn round_value(&self) -> u32 {
        self.round.value()
    }

    pub fn tent_value(&self) -> u32 {
        self.tent.value()
    }

    pub fn compute_score(&mut self) -> u32 {
        self.total_score = final_score(&self.tent, self.artifacts);
        self.total_score
    }
}
