use crate::model::hazard::HazardKind;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardKind {
    Treasure { value: u32 },
    Hazard { kind: HazardKind },
    Artifact,
}

/// A temple card. `remaining_treasure` only matters while the card lies on the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    kind: CardKind,
    remaining_treasure: u32,
}

impl Card {
    pub const fn new(kind: CardKind) -> Self {
        Self {
            kind,
            remaining_treasure: 0,
        }
    }

    pub const fn treasure(value: u32) -> Self {
        Self::new(CardKind::Treasure { value })
    }

    pub const fn hazard(kind: HazardKind) -> Self {
        Self::new(CardKind::Hazard { kind })
    }

    pub const fn artifact() -> Self {
        Self::new(CardKind::Artifact)
    }

    pub const fn kind(&self) -> CardKind {
        self.kind
    }

    pub const fn treasure_value(&self) -> Option<u32> {
        match self.kind {
            CardKind::Treasure { value } => Some(value),
            _ => None,
        }
    }

    pub const fn hazard_kind(&self) -> Option<HazardKind> {
        match self.kind {
            CardKind::Hazard { kind } => Some(kind),
            _ => None,
        }
    }

    pub const fn is_artifact(&self) -> bool {
        matches!(self.kind, CardKind::Artifact)
    }

    pub const fn remaining_treasure(&self) -> u32 {
        self.remaining_treasure
    }

    pub fn set_remaining_treasure(&mut self, amount: u32) {
        self.remaining_treasure = amount;
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CardKind::Treasure { value } => write!(f, "Treasure {value}"),
            CardKind::Hazard { kind } => write!(f, "{kind}"),
            CardKind::Artifact => f.write_str("Ancient Artifact"),
        }
    }
}
