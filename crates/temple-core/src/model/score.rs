use crate::model::player::{Player, PlayerId};
use crate::model::treasure::TreasureStore;
use serde::{Deserialize, Serialize};

pub const ARTIFACT_FIRST_TIER_COUNT: u32 = 3;
pub const ARTIFACT_FIRST_TIER_VALUE: u32 = 5;
pub const ARTIFACT_SECOND_TIER_VALUE: u32 = 10;

/// Points for `count` artifacts: the first three are worth 5, every later one 10.
pub const fn artifact_score(count: u32) -> u32 {
    if count <= ARTIFACT_FIRST_TIER_COUNT {
        count * ARTIFACT_FIRST_TIER_VALUE
    } else {
        ARTIFACT_FIRST_TIER_COUNT * ARTIFACT_FIRST_TIER_VALUE
            + (count - ARTIFACT_FIRST_TIER_COUNT) * ARTIFACT_SECOND_TIER_VALUE
    }
}

pub fn final_score(tent: &TreasureStore, artifacts: u32) -> u32 {
    tent.value() + artifact_score(artifacts)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub place: usize,
    pub player: PlayerId,
    pub name: String,
    pub is_human: bool,
    pub score: u32,
    pub artifacts: u32,
    pub tent: TreasureStore,
}

/// End-of-match ranking, best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalStandings {
    standings: Vec<Standing>,
}

impl FinalStandings {
    /// Ranks players by `(score, artifacts)` descending. The sort is stable, so
    /// full ties keep seat order and the earliest seat wins.
    pub fn from_players(players: &[Player]) -> Self {
        let mut ranked: Vec<&Player> = players.iter().collect();
        ranked.sort_by(|a, b| {
            (b.total_score(), b.artifacts()).cmp(&(a.total_score(), a.artifacts()))
        });

        let standings = ranked
            .into_iter()
            .enumerate()
            .map(|(idx, player)| Standing {
                place: idx + 1,
                player: player.id(),
                name: player.name().to_string(),
                is_human: player.is_human(),
                score: player.total_score(),
                artifacts: player.artifacts(),
                tent: *player.tent(),
            })
            .collect();

        Self { standings }
    }

    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }

    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }
}
