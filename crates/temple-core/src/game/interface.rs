use crate::bot::Rationale;
use crate::game::leaderboard::{LEADERBOARD_MAX_ENTRIES, Leaderboard, LeaderboardError};
use crate::game::snapshot::{PlayerSnapshot, TableSnapshot};
use crate::model::player::PlayerId;
use crate::model::round::{CardOutcome, Decision, DepartureReport, RoundSummary};
use crate::model::score::FinalStandings;

/// A human's answer at a decision point. `Quit` abandons the whole match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanChoice {
    Continue,
    Leave,
    Quit,
}

/// One resolved decision, with the explanation automated explorers give.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionRecord {
    pub player: PlayerId,
    pub decision: Decision,
    pub rationale: Option<Rationale>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    RoundStarted { round_number: u32 },
    CardRevealed(CardOutcome),
    DecisionsMade(Vec<DecisionRecord>),
    Departures(DepartureReport),
    RoundEnded(RoundSummary),
    MatchFinished(FinalStandings),
    MatchAbandoned { round_number: u32 },
}

/// Points where the match waits for the player before moving on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    RoundStart(u32),
    BeforeDraw,
    CardRevealed,
    RoundOver(u32),
}

/// Display collaborator. Snapshots are never read back.
pub trait TableView {
    fn render(&mut self, event: &TableEvent, snapshot: &TableSnapshot);
}

/// Input collaborator for human players.
pub trait DecisionPrompt {
    fn request_decision(&mut self, player: &PlayerSnapshot, snapshot: &TableSnapshot)
    -> HumanChoice;

    /// Blocks until the player acknowledges. The default does not wait.
    fn pause(&mut self, _pause: Pause) {}
}

/// Persistence collaborator for the winners' table.
pub trait LeaderboardStore {
    fn load(&self) -> Result<Leaderboard, LeaderboardError>;
    fn save(&mut self, leaderboard: &Leaderboard) -> Result<(), LeaderboardError>;

    fn max_entries(&self) -> usize {
        LEADERBOARD_MAX_ENTRIES
    }
}

impl<T: TableView + ?Sized> TableView for &mut T {
    fn render(&mut self, event: &TableEvent, snapshot: &TableSnapshot) {
        (**self).render(event, snapshot);
    }
}

impl<T: DecisionPrompt + ?Sized> DecisionPrompt for &mut T {
    fn request_decision(
        &mut self,
        player: &PlayerSnapshot,
        snapshot: &TableSnapshot,
    ) -> HumanChoice {
        (**self).request_decision(player, snapshot)
    }

    fn pause(&mut self, pause: Pause) {
        (**self).pause(pause);
    }
}

impl<T: LeaderboardStore + ?Sized> LeaderboardStore for &mut T {
    fn load(&self) -> Result<Leaderboard, LeaderboardError> {
        (**self).load()
    }

    fn save(&mut self, leaderboard: &Leaderboard) -> Result<(), LeaderboardError> {
        (**self).save(leaderboard)
    }

    fn max_entries(&self) -> usize {
        (**self).max_entries()
    }
}
