use std::cell::Cell;

use temple_core::bot::{DecisionWeights, ExplorerBot};
use temple_core::game::interface::{
    DecisionPrompt, HumanChoice, LeaderboardStore, Pause, TableEvent, TableView,
};
use temple_core::game::leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardError};
use temple_core::game::match_state::{MAX_ROUNDS, MatchState};
use temple_core::game::runner::{
    MatchOutcome, MatchRunner, PersistOutcome, RoundResult, record_winner,
};
use temple_core::game::snapshot::{PlayerSnapshot, TableSnapshot};
use temple_core::model::player::{Player, PlayerId};
use temple_core::model::round::{CardOutcome, Decision, RoundEndReason};
use temple_core::model::score::FinalStandings;
use temple_core::model::treasure::TreasureKind;

#[derive(Default)]
struct RecordingView {
    events: Vec<(TableEvent, TableSnapshot)>,
}

impl TableView for RecordingView {
    fn render(&mut self, event: &TableEvent, snapshot: &TableSnapshot) {
        self.events.push((event.clone(), snapshot.clone()));
    }
}

struct ScriptedPrompt {
    choice: HumanChoice,
    requests: usize,
    pauses: Vec<Pause>,
}

impl ScriptedPrompt {
    fn always(choice: HumanChoice) -> Self {
        Self {
            choice,
            requests: 0,
            pauses: Vec::new(),
        }
    }
}

impl DecisionPrompt for ScriptedPrompt {
    fn request_decision(&mut self, player: &PlayerSnapshot, _: &TableSnapshot) -> HumanChoice {
        assert!(player.is_human());
        assert!(player.in_temple);
        self.requests += 1;
        self.choice
    }

    fn pause(&mut self, pause: Pause) {
        self.pauses.push(pause);
    }
}

#[derive(Default)]
struct MemoryStore {
    board: Leaderboard,
    loads: Cell<usize>,
    saves: usize,
    fail_load: bool,
}

impl LeaderboardStore for MemoryStore {
    fn load(&self) -> Result<Leaderboard, LeaderboardError> {
        self.loads.set(self.loads.get() + 1);
        if self.fail_load {
            return Err(LeaderboardError::Io(std::io::Error::other("disk unplugged")));
        }
        Ok(self.board.clone())
    }

    fn save(&mut self, leaderboard: &Leaderboard) -> Result<(), LeaderboardError> {
        self.saves += 1;
        self.board = leaderboard.clone();
        Ok(())
    }
}

fn human_rounds(view: &RecordingView) -> Vec<Vec<&(TableEvent, TableSnapshot)>> {
    let mut rounds: Vec<Vec<_>> = Vec::new();
    for entry in &view.events {
        if matches!(entry.0, TableEvent::RoundStarted { .. }) {
            rounds.push(Vec::new());
        }
        if let Some(current) = rounds.last_mut() {
            current.push(entry);
        }
    }
    rounds
}

#[test]
fn human_leaving_after_first_card_banks_only_that_card() {
    for seed in 0..24 {
        let mut state = MatchState::with_seed("Explorer", 3, seed);
        let mut store = MemoryStore::default();
        let mut runner = MatchRunner::new(
            RecordingView::default(),
            ScriptedPrompt::always(HumanChoice::Leave),
        );
        let outcome = runner.play_match(&mut state, &mut store).unwrap();
        assert!(matches!(outcome, MatchOutcome::Completed { .. }));

        let (view, prompt) = runner.into_parts();
        let rounds = human_rounds(&view);
        assert_eq!(rounds.len(), MAX_ROUNDS as usize);

        let round_one = &rounds[0];
        let first_reveal = round_one
            .iter()
            .find_map(|(event, _)| match event {
                TableEvent::CardRevealed(outcome) => Some(outcome.clone()),
                _ => None,
            })
            .expect("a card is revealed every round");
        let departure_share = round_one
            .iter()
            .find_map(|(event, _)| match event {
                TableEvent::Departures(report) => Some(report.share_per_leaver),
                _ => None,
            })
            .unwrap_or(0);
        let expected = match first_reveal {
            CardOutcome::TreasureShared { per_player, .. } => per_player + departure_share,
            _ => 0,
        };

        let (_, end_snapshot) = round_one
            .iter()
            .find(|(event, _)| matches!(event, TableEvent::RoundEnded(_)))
            .expect("round one ends");
        let human = end_snapshot.player(PlayerId::new(0)).unwrap();
        assert_eq!(human.tent_value(), expected, "seed {seed}");
        assert_eq!(
            human.tent.count(TreasureKind::Turquoise),
            expected,
            "treasure is always turquoise"
        );

        // One request per round: the human is gone after the first card.
        assert_eq!(prompt.requests, MAX_ROUNDS as usize, "seed {seed}");
    }
}

#[test]
fn decisions_are_announced_before_departures_apply() {
    let mut state = MatchState::with_seed("Explorer", 4, 77);
    let mut runner = MatchRunner::new(
        RecordingView::default(),
        ScriptedPrompt::always(HumanChoice::Leave),
    );
    runner.play_round(&mut state).unwrap();
    let (view, _) = runner.into_parts();

    let decisions_at = view
        .events
        .iter()
        .position(|(event, _)| matches!(event, TableEvent::DecisionsMade(_)));
    if let Some(idx) = decisions_at {
        let (event, snapshot) = &view.events[idx];
        let TableEvent::DecisionsMade(records) = event else {
            unreachable!()
        };
        // Everyone inside at the decision point answered, and nobody has left yet.
        assert_eq!(records.len(), snapshot.in_temple().count());
        assert_eq!(records[0].player, PlayerId::new(0));
        assert_eq!(records[0].decision, Decision::Leave);
        assert!(records[0].rationale.is_none());
        assert!(records[1..].iter().all(|r| r.rationale.is_some()));
        assert!(matches!(
            view.events[idx + 1].0,
            TableEvent::Departures(_)
        ));
    }
}

#[test]
fn quitting_abandons_without_scoring_or_persisting() {
    let mut state = MatchState::with_seed("Explorer", 3, 5);
    let mut memory = MemoryStore::default();
    memory
        .board
        .record(LeaderboardEntry {
            name: "Earlier".to_string(),
            score: 12,
            artifacts: 0,
        });
    let before = memory.board.clone();

    let mut runner = MatchRunner::new(
        RecordingView::default(),
        ScriptedPrompt::always(HumanChoice::Quit),
    );
    let outcome = runner.play_match(&mut state, &mut memory).unwrap();

    match outcome {
        MatchOutcome::Abandoned { round_number } => assert!(round_number >= 1),
        other => panic!("expected abandonment, got {other:?}"),
    }
    assert_eq!(memory.saves, 0);
    assert_eq!(memory.loads.get(), 0);
    assert_eq!(memory.board, before);
    assert!(state.players().iter().all(|p| p.total_score() == 0));

    let (view, _) = runner.into_parts();
    assert!(matches!(
        view.events.last().map(|(event, _)| event),
        Some(TableEvent::MatchAbandoned { .. })
    ));
    assert!(
        !view
            .events
            .iter()
            .any(|(event, _)| matches!(event, TableEvent::MatchFinished(_)))
    );
}

#[test]
fn solo_human_win_is_recorded() {
    let players = vec![Player::human(PlayerId::new(0), "Solo")];
    let mut state = MatchState::from_players(players, 2024);
    let mut store = MemoryStore::default();
    let mut runner = MatchRunner::new(
        RecordingView::default(),
        ScriptedPrompt::always(HumanChoice::Leave),
    );

    let outcome = runner.play_match(&mut state, &mut store).unwrap();
    let MatchOutcome::Completed {
        standings,
        persistence,
    } = outcome
    else {
        panic!("solo match completes");
    };
    assert!(matches!(persistence, PersistOutcome::Recorded { rank: Some(1) }));
    assert_eq!(store.loads.get(), 1);
    assert_eq!(store.saves, 1);

    let winner = standings.winner().unwrap();
    assert_eq!(store.board.entries()[0].name, "Solo");
    assert_eq!(store.board.entries()[0].score, winner.score);
    assert_eq!(winner.score, state.players()[0].total_score());
}

#[test]
fn persistence_failure_keeps_match_result() {
    let players = vec![Player::human(PlayerId::new(0), "Solo")];
    let mut state = MatchState::from_players(players, 8);
    let mut store = MemoryStore {
        fail_load: true,
        ..MemoryStore::default()
    };
    let mut runner = MatchRunner::new(
        RecordingView::default(),
        ScriptedPrompt::always(HumanChoice::Leave),
    );

    match runner.play_match(&mut state, &mut store).unwrap() {
        MatchOutcome::Completed {
            standings,
            persistence,
        } => {
            assert!(matches!(
                persistence,
                PersistOutcome::Failed(LeaderboardError::Io(_))
            ));
            assert_eq!(standings.standings().len(), 1);
        }
        other => panic!("expected completion, got {other:?}"),
    }
    assert_eq!(store.saves, 0);
}

#[test]
fn automated_winner_is_not_recorded() {
    let mut human = Player::human(PlayerId::new(0), "Explorer");
    human.add_tent_treasure(TreasureKind::Turquoise, 4);
    human.compute_score();
    let mut bot = Player::with_risk_tolerance(PlayerId::new(1), "Maya the Bold", 0.7);
    bot.add_tent_treasure(TreasureKind::Gold, 1);
    bot.compute_score();

    let standings = FinalStandings::from_players(&[human, bot]);
    let mut store = MemoryStore::default();
    assert!(matches!(
        record_winner(&mut store, &standings),
        PersistOutcome::NotHuman
    ));
    assert_eq!(store.loads.get(), 0);
    assert_eq!(store.saves, 0);
}

#[test]
fn standard_deck_rounds_never_run_dry() {
    for seed in 100..140 {
        let mut state = MatchState::with_seed("Explorer", 6, seed);
        let mut runner = MatchRunner::new(
            RecordingView::default(),
            ScriptedPrompt::always(HumanChoice::Continue),
        );
        for _ in 0..MAX_ROUNDS {
            match runner.play_round(&mut state).unwrap() {
                RoundResult::Finished(summary) => {
                    assert_ne!(summary.reason, RoundEndReason::DeckExhausted);
                    if summary.reason == RoundEndReason::SecondHazard {
                        assert!(summary.stranded.iter().all(|id| {
                            state.player(*id).is_some_and(|p| p.round_value() == 0)
                        }));
                    }
                }
                RoundResult::Quit => panic!("nobody quits"),
            }
        }
    }
}

#[test]
fn cautious_bots_clear_out_and_round_ends_all_left() {
    // A round divisor this small pushes every leave probability past 1.
    let bot = ExplorerBot::new(DecisionWeights {
        round_divisor: 0.01,
        ..DecisionWeights::default()
    });
    let mut state = MatchState::with_seed("Explorer", 3, 31).with_bot(bot);
    let mut runner = MatchRunner::new(
        RecordingView::default(),
        ScriptedPrompt::always(HumanChoice::Leave),
    );
    let result = runner.play_round(&mut state).unwrap();
    let RoundResult::Finished(summary) = result else {
        panic!("round finishes");
    };
    assert_eq!(summary.cards_revealed, 1);
    assert_eq!(summary.reason, RoundEndReason::AllLeft);
    assert!(summary.stranded.is_empty());
    let (_, prompt) = runner.into_parts();
    assert_eq!(prompt.pauses.first(), Some(&Pause::RoundStart(1)));
    assert_eq!(prompt.pauses.last(), Some(&Pause::RoundOver(1)));
}

#[test]
fn collected_decisions_cover_everyone_inside() {
    let mut state = MatchState::with_seed("Explorer", 3, 41);
    state.start_round();
    state.reveal_next().unwrap();

    let mut runner = MatchRunner::new(
        RecordingView::default(),
        ScriptedPrompt::always(HumanChoice::Continue),
    );
    let records = runner
        .collect_decisions(&mut state)
        .unwrap()
        .expect("nobody quit");
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].player, PlayerId::new(0));
    assert_eq!(records[0].decision, Decision::Continue);
    assert!(records[0].rationale.is_none());
    assert!(records[1..].iter().all(|r| r.rationale.is_some()));

    let mut quitting = MatchRunner::new(
        RecordingView::default(),
        ScriptedPrompt::always(HumanChoice::Quit),
    );
    assert!(quitting.collect_decisions(&mut state).unwrap().is_none());
    let (_, prompt) = quitting.into_parts();
    assert_eq!(prompt.requests, 1);
}
