use crate::model::card::{Card, CardKind};
use crate::model::deck::{Deck, DeckError};
use crate::model::hazard::{HazardKind, HazardTally};
use crate::model::player::{Player, PlayerId};
use crate::model::treasure::TreasureKind;
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundEndReason {
    AllLeft,
    DeckExhausted,
    SecondHazard,
}

impl fmt::Display for RoundEndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoundEndReason::AllLeft => "all explorers returned to camp",
            RoundEndReason::DeckExhausted => "the temple ran out of cards",
            RoundEndReason::SecondHazard => "a second hazard of the same kind appeared",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    NotStarted,
    AwaitingFirstCard,
    AwaitingDecisions,
    AwaitingNextCard,
    Ended(RoundEndReason),
}

impl RoundPhase {
    pub const fn is_ended(self) -> bool {
        matches!(self, RoundPhase::Ended(_))
    }

    const fn awaits_card(self) -> bool {
        matches!(
            self,
            RoundPhase::AwaitingFirstCard | RoundPhase::AwaitingNextCard
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Continue,
    Leave,
}

impl Decision {
    pub const fn from_continue(continue_exploring: bool) -> Self {
        if continue_exploring {
            Decision::Continue
        } else {
            Decision::Leave
        }
    }
}

/// What a revealed card did to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardOutcome {
    TreasureShared {
        value: u32,
        per_player: u32,
        remainder: u32,
        recipients: Vec<PlayerId>,
    },
    HazardSighted {
        kind: HazardKind,
    },
    HazardStrike {
        kind: HazardKind,
        victims: Vec<PlayerId>,
    },
    ArtifactRevealed {
        pending: u32,
    },
}

impl CardOutcome {
    pub fn ends_round(&self) -> bool {
        matches!(self, CardOutcome::HazardStrike { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DepartureReport {
    pub leavers: Vec<PlayerId>,
    pub path_treasure: u32,
    pub share_per_leaver: u32,
    pub dropped: u32,
    pub artifacts_awarded: Option<(PlayerId, u32)>,
}

impl DepartureReport {
    pub fn is_empty(&self) -> bool {
        self.leavers.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_number: u32,
    pub reason: RoundEndReason,
    pub cards_revealed: usize,
    /// Players still inside when the round ended; they forfeit their round store.
    pub stranded: Vec<PlayerId>,
    pub forfeited_artifacts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("no cards remain in the temple deck")]
    EmptyDeck,
    #[error("round is {actual:?}, expected {expected}")]
    UnexpectedPhase {
        expected: &'static str,
        actual: RoundPhase,
    },
    #[error("no player at {0}")]
    UnknownPlayer(PlayerId),
    #[error("player at {0} is not automated")]
    NotAutomated(PlayerId),
}

impl From<DeckError> for RoundError {
    fn from(value: DeckError) -> Self {
        match value {
            DeckError::Empty => RoundError::EmptyDeck,
        }
    }
}

/// Deck, path, hazard tally and pending artifacts for the round being played.
/// Players are borrowed per call so the match keeps ownership across rounds.
#[derive(Debug, Clone)]
pub struct RoundState {
    round_number: u32,
    deck: Deck,
    path: Vec<Card>,
    hazards: HazardTally,
    pending_artifacts: u32,
    phase: RoundPhase,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundState {
    pub fn new() -> Self {
        Self {
            round_number: 0,
            deck: Deck::empty(),
            path: Vec::new(),
            hazards: HazardTally::new(),
            pending_artifacts: 0,
            phase: RoundPhase::NotStarted,
        }
    }

    /// Starts the next round with a freshly shuffled deck.
    pub fn setup_round<R: rand::Rng + ?Sized>(&mut self, rng: &mut R, players: &mut [Player]) {
        self.setup_round_with_deck(Deck::shuffled(rng), players);
    }

    /// Starts the next round with `deck` dealt in its current order.
    pub fn setup_round_with_deck(&mut self, deck: Deck, players: &mut [Player]) {
        self.round_number += 1;
        self.deck = deck;
        self.path.clear();
        self.hazards.reset();
        self.pending_artifacts = 0;
        for player in players.iter_mut() {
            player.reset_for_round();
        }
        self.phase = RoundPhase::AwaitingFirstCard;

        event!(
            target: "temple_core::round",
            Level::INFO,
            round = self.round_number,
            players = players.len(),
            deck = self.deck.remaining(),
            "round started"
        );
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn path(&self) -> &[Card] {
        &self.path
    }

    pub fn hazards(&self) -> &HazardTally {
        &self.hazards
    }

    pub fn pending_artifacts(&self) -> u32 {
        self.pending_artifacts
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Treasure left over on path cards from indivisible splits.
    pub fn path_treasure(&self) -> u32 {
        self.path.iter().map(Card::remaining_treasure).sum()
    }

    /// Termination checks run before every draw: everyone gone first, then an
    /// empty deck.
    pub fn check_end(&self, players: &[Player]) -> Option<RoundEndReason> {
        if !players.iter().any(Player::in_temple) {
            Some(RoundEndReason::AllLeft)
        } else if self.deck.is_empty() {
            Some(RoundEndReason::DeckExhausted)
        } else {
            None
        }
    }

    /// Draws the next card and resolves it. Callers run [`Self::check_end`] first.
    pub fn reveal_next(&mut self, players: &mut [Player]) -> Result<CardOutcome, RoundError> {
        if !self.phase.awaits_card() {
            return Err(RoundError::UnexpectedPhase {
                expected: "a card draw",
                actual: self.phase,
            });
        }
        let card = self.deck.draw()?;
        Ok(self.process_card(card, players))
    }

    /// Lays `card` on the path and applies its effect.
    pub fn process_card(&mut self, card: Card, players: &mut [Player]) -> CardOutcome {
        self.path.push(card);

        let outcome = match card.kind() {
            CardKind::Treasure { value } => self.share_treasure(value, players),
            CardKind::Hazard { kind } => {
                let count = self.hazards.record(kind);
                if count >= HazardTally::FATAL_COUNT {
                    let mut victims = Vec::new();
                    for player in players.iter_mut().filter(|p| p.in_temple()) {
                        player.lose_round_treasures();
                        victims.push(player.id());
                    }
                    CardOutcome::HazardStrike { kind, victims }
                } else {
                    CardOutcome::HazardSighted { kind }
                }
            }
            CardKind::Artifact => {
                self.pending_artifacts += 1;
                CardOutcome::ArtifactRevealed {
                    pending: self.pending_artifacts,
                }
            }
        };

        self.phase = if outcome.ends_round() {
            RoundPhase::Ended(RoundEndReason::SecondHazard)
        } else {
            RoundPhase::AwaitingDecisions
        };

        event!(
            target: "temple_core::round",
            Level::DEBUG,
            round = self.round_number,
            card = %card,
            path_len = self.path.len(),
            ends_round = outcome.ends_round(),
            "card revealed"
        );

        outcome
    }

    // With nobody inside the treasure is not split and no remainder is recorded.
    fn share_treasure(&mut self, value: u32, players: &mut [Player]) -> CardOutcome {
        let recipients: Vec<PlayerId> = players
            .iter()
            .filter(|p| p.in_temple())
            .map(Player::id)
            .collect();
        if recipients.is_empty() {
            return CardOutcome::TreasureShared {
                value,
                per_player: 0,
                remainder: 0,
                recipients,
            };
        }

        let count = recipients.len() as u32;
        let per_player = value / count;
        let remainder = value % count;
        for player in players.iter_mut().filter(|p| p.in_temple()) {
            player.add_round_treasure(TreasureKind::Turquoise, per_player);
        }
        if let Some(card) = self.path.last_mut() {
            card.set_remaining_treasure(remainder);
        }

        CardOutcome::TreasureShared {
            value,
            per_player,
            remainder,
            recipients,
        }
    }

    /// Applies one simultaneous set of decisions. Every decision must belong to a
    /// player who is still in the temple.
    pub fn apply_departures(
        &mut self,
        decisions: &[(PlayerId, Decision)],
        players: &mut [Player],
    ) -> Result<DepartureReport, RoundError> {
        if self.phase != RoundPhase::AwaitingDecisions {
            return Err(RoundError::UnexpectedPhase {
                expected: "decisions",
                actual: self.phase,
            });
        }
        for (id, _) in decisions {
            if !players.iter().any(|p| p.id() == *id) {
                return Err(RoundError::UnknownPlayer(*id));
            }
        }

        let leavers: Vec<PlayerId> = decisions
            .iter()
            .filter(|(_, decision)| *decision == Decision::Leave)
            .map(|(id, _)| *id)
            .filter(|id| players.iter().any(|p| p.id() == *id && p.in_temple()))
            .collect();

        self.phase = RoundPhase::AwaitingNextCard;
        if leavers.is_empty() {
            return Ok(DepartureReport::default());
        }

        for player in players.iter_mut().filter(|p| leavers.contains(&p.id())) {
            player.move_round_to_tent();
            player.leave_temple();
        }

        let path_treasure = self.path_treasure();
        let share_per_leaver = path_treasure / leavers.len() as u32;
        let dropped = path_treasure % leavers.len() as u32;
        if share_per_leaver > 0 {
            for player in players.iter_mut().filter(|p| leavers.contains(&p.id())) {
                player.add_tent_treasure(TreasureKind::Turquoise, share_per_leaver);
            }
        }
        for card in &mut self.path {
            card.set_remaining_treasure(0);
        }

        let mut artifacts_awarded = None;
        if let [lone] = leavers.as_slice() {
            if self.pending_artifacts > 0 {
                if let Some(player) = players.iter_mut().find(|p| p.id() == *lone) {
                    player.award_artifacts(self.pending_artifacts);
                }
                artifacts_awarded = Some((*lone, self.pending_artifacts));
                self.pending_artifacts = 0;
            }
        }

        event!(
            target: "temple_core::round",
            Level::DEBUG,
            round = self.round_number,
            leavers = leavers.len(),
            path_treasure,
            share_per_leaver,
            dropped,
            artifacts = artifacts_awarded.map(|(_, n)| n).unwrap_or(0),
            "departures applied"
        );

        Ok(DepartureReport {
            leavers,
            path_treasure,
            share_per_leaver,
            dropped,
            artifacts_awarded,
        })
    }

    /// Closes the round. Explorers still inside forfeit their round store and
    /// pending artifacts are discarded.
    pub fn finish(&mut self, reason: RoundEndReason, players: &mut [Player]) -> RoundSummary {
        let mut stranded = Vec::new();
        for player in players.iter_mut().filter(|p| p.in_temple()) {
            player.lose_round_treasures();
            stranded.push(player.id());
        }
        let forfeited_artifacts = std::mem::take(&mut self.pending_artifacts);
        self.phase = RoundPhase::Ended(reason);

        event!(
            target: "temple_core::round",
            Level::INFO,
            round = self.round_number,
            reason = ?reason,
            stranded = stranded.len(),
            forfeited_artifacts,
            "round ended"
        );

        RoundSummary {
            round_number: self.round_number,
            reason,
            cards_revealed: self.path.len(),
            stranded,
            forfeited_artifacts,
        }
    }
}
