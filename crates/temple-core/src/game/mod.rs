pub mod interface;
pub mod leaderboard;
pub mod match_state;
pub mod runner;
pub mod snapshot;
