use crate::game::interface::{
    DecisionPrompt, DecisionRecord, HumanChoice, LeaderboardStore, Pause, TableEvent, TableView,
};
use crate::game::leaderboard::{LeaderboardEntry, LeaderboardError};
use crate::game::match_state::MatchState;
use crate::model::player::PlayerKind;
use crate::model::round::{Decision, RoundError, RoundPhase, RoundSummary};
use crate::model::score::FinalStandings;
use tracing::{Level, event};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundResult {
    Finished(RoundSummary),
    Quit,
}

#[derive(Debug)]
pub enum PersistOutcome {
    Recorded { rank: Option<usize> },
    /// The winner was automated; nothing is written.
    NotHuman,
    Failed(LeaderboardError),
}

#[derive(Debug)]
pub enum MatchOutcome {
    Completed {
        standings: FinalStandings,
        persistence: PersistOutcome,
    },
    Abandoned {
        round_number: u32,
    },
}

/// Drives rounds against the display and input collaborators.
pub struct MatchRunner<V, P> {
    view: V,
    prompt: P,
}

impl<V: TableView, P: DecisionPrompt> MatchRunner<V, P> {
    pub fn new(view: V, prompt: P) -> Self {
        Self { view, prompt }
    }

    pub fn into_parts(self) -> (V, P) {
        (self.view, self.prompt)
    }

    /// Plays every round, scores the table and hands the winner to `store`.
    /// A quit skips both scoring and persistence.
    pub fn play_match<S: LeaderboardStore + ?Sized>(
        &mut self,
        state: &mut MatchState,
        store: &mut S,
    ) -> Result<MatchOutcome, RoundError> {
        for _ in 0..state.max_rounds() {
            if let RoundResult::Quit = self.play_round(state)? {
                let round_number = state.round_number();
                event!(
                    target: "temple_core::match",
                    Level::INFO,
                    round = round_number,
                    "match abandoned"
                );
                self.view.render(
                    &TableEvent::MatchAbandoned { round_number },
                    &state.snapshot(),
                );
                return Ok(MatchOutcome::Abandoned { round_number });
            }
        }

        let standings = state.final_standings();
        if let Some(winner) = standings.winner() {
            event!(
                target: "temple_core::match",
                Level::INFO,
                winner = %winner.name,
                score = winner.score,
                artifacts = winner.artifacts,
                seed = state.seed(),
                "match finished"
            );
        }
        self.view
            .render(&TableEvent::MatchFinished(standings.clone()), &state.snapshot());

        let persistence = record_winner(store, &standings);
        Ok(MatchOutcome::Completed {
            standings,
            persistence,
        })
    }

    pub fn play_round(&mut self, state: &mut MatchState) -> Result<RoundResult, RoundError> {
        state.start_round();
        let round_number = state.round_number();
        self.view
            .render(&TableEvent::RoundStarted { round_number }, &state.snapshot());
        self.prompt.pause(Pause::RoundStart(round_number));

        let summary = loop {
            if let Some(summary) = state.try_finish_round() {
                break summary;
            }
            if state.round().phase() == RoundPhase::AwaitingNextCard {
                self.prompt.pause(Pause::BeforeDraw);
            }

            let outcome = state.reveal_next()?;
            let ends_round = outcome.ends_round();
            self.view
                .render(&TableEvent::CardRevealed(outcome), &state.snapshot());
            if ends_round {
                self.prompt.pause(Pause::CardRevealed);
                match state.finish_round() {
                    Some(summary) => break summary,
                    None => {
                        return Err(RoundError::UnexpectedPhase {
                            expected: "an ended round",
                            actual: state.round().phase(),
                        });
                    }
                }
            }

            let Some(records) = self.collect_decisions(state)? else {
                return Ok(RoundResult::Quit);
            };
            let decisions: Vec<_> = records.iter().map(|r| (r.player, r.decision)).collect();
            self.view
                .render(&TableEvent::DecisionsMade(records), &state.snapshot());

            let report = state.apply_departures(&decisions)?;
            if !report.is_empty() {
                self.view
                    .render(&TableEvent::Departures(report), &state.snapshot());
            }
        };

        self.view
            .render(&TableEvent::RoundEnded(summary.clone()), &state.snapshot());
        self.prompt.pause(Pause::RoundOver(round_number));
        Ok(RoundResult::Finished(summary))
    }

    /// Gathers a decision from every explorer still inside before any is applied.
    /// Returns `Ok(None)` when a human quits.
    pub fn collect_decisions(
        &mut self,
        state: &mut MatchState,
    ) -> Result<Option<Vec<DecisionRecord>>, RoundError> {
        let snapshot = state.snapshot();
        let view = state.decision_view();
        let present: Vec<_> = state
            .players()
            .iter()
            .filter(|p| p.in_temple())
            .map(|p| (p.id(), p.kind()))
            .collect();

        let mut records = Vec::with_capacity(present.len());
        for (id, kind) in present {
            let record = match kind {
                PlayerKind::Human => {
                    let player = snapshot.player(id).ok_or(RoundError::UnknownPlayer(id))?;
                    let decision = match self.prompt.request_decision(player, &snapshot) {
                        HumanChoice::Continue => Decision::Continue,
                        HumanChoice::Leave => Decision::Leave,
                        HumanChoice::Quit => return Ok(None),
                    };
                    DecisionRecord {
                        player: id,
                        decision,
                        rationale: None,
                    }
                }
                PlayerKind::Automated { .. } => {
                    let agent = state.automated_decision(id, &view)?;
                    DecisionRecord {
                        player: id,
                        decision: Decision::from_continue(agent.continue_exploring),
                        rationale: Some(agent.rationale),
                    }
                }
            };
            records.push(record);
        }
        Ok(Some(records))
    }
}

/// Stores a human winner on the leaderboard. Failures are logged and returned,
/// never propagated.
pub fn record_winner<S: LeaderboardStore + ?Sized>(
    store: &mut S,
    standings: &FinalStandings,
) -> PersistOutcome {
    let Some(winner) = standings.winner() else {
        return PersistOutcome::NotHuman;
    };
    if !winner.is_human {
        return PersistOutcome::NotHuman;
    }

    match persist_entry(store, LeaderboardEntry::from(winner)) {
        Ok(rank) => PersistOutcome::Recorded { rank },
        Err(err) => {
            tracing::warn!(target: "temple_core::match", error = %err, "leaderboard not updated");
            PersistOutcome::Failed(err)
        }
    }
}

fn persist_entry<S: LeaderboardStore + ?Sized>(
    store: &mut S,
    entry: LeaderboardEntry,
) -> Result<Option<usize>, LeaderboardError> {
    let mut board = store.load()?;
    let rank = board.record_capped(entry, store.max_entries());
    store.save(&board)?;
    Ok(rank)
}
