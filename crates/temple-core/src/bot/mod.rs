mod explorer;
mod params;
mod rationale;

pub use explorer::{AgentDecision, ExplorerBot};
pub use params::DecisionWeights;
pub use rationale::{Crowding, HazardExposure, Rationale, Temperament, TreasureOutlook};

use crate::model::hazard::HazardTally;

/// Shared table facts every automated explorer sees at a decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionView {
    pub hazards: HazardTally,
    pub players_remaining: usize,
    pub round_number: u32,
}
