use crate::model::card::Card;
use crate::model::deal::{Deal, DealError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// A deck numbered `1..=size`.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn numbered(size: usize) -> Self {
        let cards = (1..=size).map(|rank| Card::new(rank as u16)).collect();
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut deck = Self::numbered(size);
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Split the deck, in its current order, into consecutive equal hands.
    pub fn deal(&self, num_players: usize) -> Result<Deal, DealError> {
        if num_players == 0 || self.cards.len() % num_players != 0 {
            return Err(DealError::UnevenDeck {
                cards: self.cards.len(),
                players: num_players,
            });
        }
        let hand_size = self.cards.len() / num_players;
        let hands = (0..num_players)
            .map(|seat| self.cards[seat * hand_size..(seat + 1) * hand_size].to_vec())
            .collect();
        Ok(Deal::new(hands))
    }
}

/// Source of fresh deals when a game is not handed one explicitly.
pub trait DeckDistributor {
    fn distribute(&mut self, hand_size: usize, num_players: usize) -> Result<Deal, DealError>;
}

/// Uniformly random partition: shuffle a numbered deck and cut it into hands.
#[derive(Debug, Clone)]
pub struct ShuffleDistributor<R = StdRng> {
    rng: R,
}

impl ShuffleDistributor<StdRng> {
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: rand::Rng> ShuffleDistributor<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: rand::Rng> DeckDistributor for ShuffleDistributor<R> {
    fn distribute(&mut self, hand_size: usize, num_players: usize) -> Result<Deal, DealError> {
        Deck::shuffled(hand_size * num_players, &mut self.rng).deal(num_players)
    }
}
