use crate::bot::{AgentDecision, DecisionView, ExplorerBot};
use crate::game::snapshot::TableSnapshot;
use crate::model::player::{Player, PlayerId, PlayerKind};
use crate::model::round::{
    CardOutcome, Decision, DepartureReport, RoundError, RoundPhase, RoundState, RoundSummary,
};
use crate::model::score::FinalStandings;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const MAX_ROUNDS: u32 = 5;
/// Seats at the table, the human included.
pub const MAX_PLAYERS: usize = 7;
pub const MIN_AUTOMATED_PLAYERS: usize = 1;
pub const DEFAULT_AUTOMATED_PLAYERS: usize = 3;

pub const AUTOMATED_NAMES: [&str; MAX_PLAYERS] = [
    "Maya the Bold",
    "Diego the Cautious",
    "Carmen the Lucky",
    "Zara the Wise",
    "Felix the Daring",
    "Iris the Patient",
    "Thor the Brave",
];

/// Clamps a requested opponent count to `[1, MAX_PLAYERS - 1]`.
pub fn clamp_automated_count(requested: usize) -> usize {
    requested.clamp(MIN_AUTOMATED_PLAYERS, MAX_PLAYERS - 1)
}

#[derive(Debug, Clone)]
pub struct MatchState {
    players: Vec<Player>,
    round: RoundState,
    bot: ExplorerBot,
    max_rounds: u32,
    rng: StdRng,
    seed: u64,
}

impl MatchState {
    /// One human in seat 0 followed by `automated` explorers (clamped).
    pub fn new(human_name: impl Into<String>, automated: usize) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(human_name, automated, seed)
    }

    pub fn with_seed(human_name: impl Into<String>, automated: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut players = vec![Player::human(PlayerId::new(0), human_name)];
        for (offset, name) in AUTOMATED_NAMES
            .iter()
            .take(clamp_automated_count(automated))
            .enumerate()
        {
            players.push(Player::automated(PlayerId::new(offset + 1), *name, &mut rng));
        }
        Self::from_parts(players, rng, seed)
    }

    /// A match over an explicit roster. Player ids must equal their seat index.
    pub fn from_players(players: Vec<Player>, seed: u64) -> Self {
        Self::from_parts(players, StdRng::seed_from_u64(seed), seed)
    }

    fn from_parts(players: Vec<Player>, rng: StdRng, seed: u64) -> Self {
        debug_assert!(
            players
                .iter()
                .enumerate()
                .all(|(idx, p)| p.id().index() == idx)
        );
        Self {
            players,
            round: RoundState::new(),
            bot: ExplorerBot::default(),
            max_rounds: MAX_ROUNDS,
            rng,
            seed,
        }
    }

    pub fn with_bot(mut self, bot: ExplorerBot) -> Self {
        self.bot = bot;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn round_number(&self) -> u32 {
        self.round.round_number()
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::capture(&self.round, &self.players, self.max_rounds)
    }

    pub fn start_round(&mut self) {
        self.round.setup_round(&mut self.rng, &mut self.players);
    }

    pub fn reveal_next(&mut self) -> Result<CardOutcome, RoundError> {
        self.round.reveal_next(&mut self.players)
    }

    pub fn apply_departures(
        &mut self,
        decisions: &[(PlayerId, Decision)],
    ) -> Result<DepartureReport, RoundError> {
        self.round.apply_departures(decisions, &mut self.players)
    }

    /// Runs the pre-draw checks and closes the round if one of them fires.
    pub fn try_finish_round(&mut self) -> Option<RoundSummary> {
        let reason = self.round.check_end(&self.players)?;
        Some(self.round.finish(reason, &mut self.players))
    }

    pub fn finish_round(&mut self) -> Option<RoundSummary> {
        match self.round.phase() {
            RoundPhase::Ended(reason) => Some(self.round.finish(reason, &mut self.players)),
            _ => None,
        }
    }

    /// The table facts shared by every automated explorer at this decision point.
    pub fn decision_view(&self) -> DecisionView {
        DecisionView {
            hazards: *self.round.hazards(),
            players_remaining: self.players.iter().filter(|p| p.in_temple()).count(),
            round_number: self.round.round_number(),
        }
    }

    /// Asks the bot for `id`'s move.
    pub fn automated_decision(
        &mut self,
        id: PlayerId,
        view: &DecisionView,
    ) -> Result<AgentDecision, RoundError> {
        let player = self
            .players
            .get(id.index())
            .ok_or(RoundError::UnknownPlayer(id))?;
        match player.kind() {
            PlayerKind::Human => Err(RoundError::NotAutomated(id)),
            PlayerKind::Automated { risk_tolerance } => Ok(self.bot.decide(
                view,
                risk_tolerance,
                player.round_value(),
                &mut self.rng,
            )),
        }
    }

    /// Computes every final score and ranks the table.
    pub fn final_standings(&mut self) -> FinalStandings {
        for player in &mut self.players {
            player.compute_score();
        }
        FinalStandings::from_players(&self.players)
    }
}
