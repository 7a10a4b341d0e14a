use crate::model::card::Card;
use crate::model::hazard::HazardKind;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;
use thiserror::Error;

pub const TREASURE_VALUES: [u32; 16] = [1, 2, 3, 4, 5, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
pub const HAZARD_COPIES: usize = 2;
pub const ARTIFACTS_PER_ROUND: usize = 1;
pub const DECK_SIZE: usize =
    TREASURE_VALUES.len() + HazardKind::ALL.len() * HAZARD_COPIES + ARTIFACTS_PER_ROUND;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("attempted to draw from an empty deck")]
    Empty,
}

#[derive(Debug, Clone)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// The full round population in construction order.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        cards.extend(TREASURE_VALUES.iter().copied().map(Card::treasure));
        for kind in HazardKind::ALL.iter().copied() {
            for _ in 0..HAZARD_COPIES {
                cards.push(Card::hazard(kind));
            }
        }
        for _ in 0..ARTIFACTS_PER_ROUND {
            cards.push(Card::artifact());
        }
        Self::from_cards(cards)
    }

    /// A deck that deals `cards` front to back, unshuffled.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }

    pub fn empty() -> Self {
        Self::from_cards(Vec::new())
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop_front().ok_or(DeckError::Empty)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{DECK_SIZE, Deck, DeckError};
    use crate::model::card::Card;
    use crate::model::hazard::HazardKind;

    #[test]
    fn standard_deck_has_27_cards() {
        let deck = Deck::standard();
        assert_eq!(DECK_SIZE, 27);
        assert_eq!(deck.remaining(), 27);
    }

    #[test]
    fn standard_deck_composition() {
        let deck = Deck::standard();
        let mut treasure: Vec<u32> = deck.cards().filter_map(Card::treasure_value).collect();
        treasure.sort_unstable();
        assert_eq!(treasure, vec![1, 2, 3, 4, 5, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);

        for kind in HazardKind::ALL {
            let copies = deck
                .cards()
                .filter(|card| card.hazard_kind() == Some(kind))
                .count();
            assert_eq!(copies, 2, "{kind} should appear twice");
        }
        assert_eq!(deck.cards().filter(|card| card.is_artifact()).count(), 1);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert!(deck_a.cards().eq(deck_b.cards()));
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert!(!deck_a.cards().eq(deck_b.cards()));
    }

    #[test]
    fn draw_consumes_front_to_back() {
        let mut deck = Deck::from_cards(vec![Card::treasure(3), Card::artifact()]);
        assert_eq!(deck.draw(), Ok(Card::treasure(3)));
        assert_eq!(deck.draw(), Ok(Card::artifact()));
        assert!(deck.is_empty());
    }

    #[test]
    fn drawing_from_empty_deck_errors() {
        let mut deck = Deck::empty();
        assert_eq!(deck.draw(), Err(DeckError::Empty));
    }
}
