use super::params::DecisionWeights;
use super::rationale::{Crowding, HazardExposure, Rationale, Temperament, TreasureOutlook};
use super::DecisionView;
use rand::Rng;
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentDecision {
    /// `true` keeps exploring, `false` heads back to camp.
    pub continue_exploring: bool,
    pub leave_probability: f64,
    pub rationale: Rationale,
}

/// Continue/leave policy for automated explorers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplorerBot {
    weights: DecisionWeights,
}

impl ExplorerBot {
    pub const fn new(weights: DecisionWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &DecisionWeights {
        &self.weights
    }

    pub fn decide<R: Rng + ?Sized>(
        &self,
        view: &DecisionView,
        risk_tolerance: f64,
        round_value: u32,
        rng: &mut R,
    ) -> AgentDecision {
        let spread = self.weights.randomness;
        let jitter = if spread > 0.0 {
            rng.gen_range(-spread..=spread)
        } else {
            0.0
        };
        let leave_probability = self.weights.leave_probability(
            view.hazards.max_count(),
            round_value,
            view.players_remaining,
            risk_tolerance,
            view.round_number,
            jitter,
        );
        let roll: f64 = rng.gen_range(0.0..1.0);
        let continue_exploring = roll > leave_probability;

        let rationale = Rationale {
            treasure: TreasureOutlook::from_value(round_value),
            hazards: HazardExposure::from_singles(view.hazards.single_sightings()),
            crowding: Crowding::from_players(view.players_remaining),
            temperament: Temperament::from_risk_tolerance(risk_tolerance),
        };

        if tracing::enabled!(Level::DEBUG) {
            event!(
                target: "temple_core::bot",
                Level::DEBUG,
                round = view.round_number,
                players_remaining = view.players_remaining,
                round_value,
                risk_tolerance,
                leave_probability,
                roll,
                continue_exploring,
            );
        }

        AgentDecision {
            continue_exploring,
            leave_probability,
            rationale,
        }
    }
}
