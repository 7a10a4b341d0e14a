/// Tuning constants for the automated explorer's leave probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionWeights {
    pub risk: f64,
    pub treasure: f64,
    pub players: f64,
    pub randomness: f64,
    /// Round value at which the treasure term saturates.
    pub treasure_cap: f64,
    /// Divisor applied to the round number for late-game caution.
    pub round_divisor: f64,
}

impl Default for DecisionWeights {
    fn default() -> Self {
        Self {
            risk: 0.5,
            treasure: 0.3,
            players: 0.2,
            randomness: 0.1,
            treasure_cap: 20.0,
            round_divisor: 10.0,
        }
    }
}

impl DecisionWeights {
    /// Leave probability before the final coin flip. `jitter` must already be
    /// drawn from `[-randomness, randomness]`.
    pub fn leave_probability(
        &self,
        max_hazards: u8,
        round_value: u32,
        players_remaining: usize,
        risk_tolerance: f64,
        round_number: u32,
        jitter: f64,
    ) -> f64 {
        let risk = f64::from(max_hazards) * self.risk;
        let treasure = (f64::from(round_value) / self.treasure_cap).min(1.0) * self.treasure;
        let crowd = (1.0 / players_remaining.max(1) as f64) * self.players;

        let base = (risk + treasure - crowd + (1.0 - risk_tolerance) + jitter) / 2.0;
        base + f64::from(round_number) / self.round_divisor
    }
}
