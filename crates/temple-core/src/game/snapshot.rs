use crate::model::card::Card;
use crate::model::hazard::HazardTally;
use crate::model::player::{Player, PlayerId, PlayerKind};
use crate::model::round::{RoundPhase, RoundState};
use crate::model::treasure::TreasureStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    pub in_temple: bool,
    pub round_treasures: TreasureStore,
    pub tent: TreasureStore,
    pub artifacts: u32,
}

impl PlayerSnapshot {
    pub fn capture(player: &Player) -> Self {
        Self {
            id: player.id(),
            name: player.name().to_string(),
            kind: player.kind(),
            in_temple: player.in_temple(),
            round_treasures: *player.round_treasures(),
            tent: *player.tent(),
            artifacts: player.artifacts(),
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    pub fn round_value(&self) -> u32 {
        self.round_treasures.value()
    }

    pub fn tent_value(&self) -> u32 {
        self.tent.value()
    }
}

/// Read-only view of the table handed to display and input collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub round_number: u32,
    pub max_rounds: u32,
    pub phase: RoundPhase,
    pub deck_remaining: usize,
    pub players: Vec<PlayerSnapshot>,
    pub path: Vec<Card>,
    pub hazards: HazardTally,
    pub pending_artifacts: u32,
}

impl TableSnapshot {
    pub fn capture(round: &RoundState, players: &[Player], max_rounds: u32) -> Self {
        Self {
            round_number: round.round_number(),
            max_rounds,
            phase: round.phase(),
            deck_remaining: round.deck_remaining(),
            players: players.iter().map(PlayerSnapshot::capture).collect(),
            path: round.path().to_vec(),
            hazards: *round.hazards(),
            pending_artifacts: round.pending_artifacts(),
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn in_temple(&self) -> impl Iterator<Item = &PlayerSnapshot> + '_ {
        self.players.iter().filter(|p| p.in_temple)
    }

    pub fn at_camp(&self) -> impl Iterator<Item = &PlayerSnapshot> + '_ {
        self.players.iter().filter(|p| !p.in_temple)
    }

    pub fn path_treasure(&self) -> u32 {
        self.path.iter().map(Card::remaining_treasure).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
