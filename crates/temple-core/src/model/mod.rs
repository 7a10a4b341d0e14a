pub mod card;
pub mod deck;
pub mod hazard;
pub mod player;
pub mod round;
pub mod score;
pub mod treasure;
