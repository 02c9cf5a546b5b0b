use crate::model::card::Card;
use crate::model::seat::Seat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One complete assignment of the card universe to the players, hand `i`
/// belonging to seat `i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deal {
    hands: Vec<Vec<Card>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealError {
    PlayerCount {
        expected: usize,
        found: usize,
    },
    HandSize {
        seat: Seat,
        expected: usize,
        found: usize,
    },
    DuplicateCard(Card),
    /// A card outside `{0..N-1}` / `{1..N}`, or a gap in the numbering.
    Universe(Card),
    UnevenDeck {
        cards: usize,
        players: usize,
    },
}

impl fmt::Display for DealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealError::PlayerCount { expected, found } => {
                write!(f, "deal has {found} hands but the table seats {expected}")
            }
            DealError::HandSize {
                seat,
                expected,
                found,
            } => write!(f, "{seat} was dealt {found} cards, expected {expected}"),
            DealError::DuplicateCard(card) => write!(f, "card {card} dealt more than once"),
            DealError::Universe(card) => {
                write!(f, "card {card} is outside the numbered deck")
            }
            DealError::UnevenDeck { cards, players } => {
                write!(f, "{cards} cards cannot be split evenly between {players} players")
            }
        }
    }
}

impl std::error::Error for DealError {}

impl Deal {
    pub fn new(hands: Vec<Vec<Card>>) -> Self {
        Self { hands }
    }

    pub fn from_ranks<H, R>(hands: H) -> Self
    where
        H: IntoIterator<Item = R>,
        R: IntoIterator<Item = u16>,
    {
        Self {
            hands: hands
                .into_iter()
                .map(|hand| hand.into_iter().map(Card::new).collect())
                .collect(),
        }
    }

    pub fn hands(&self) -> &[Vec<Card>] {
        &self.hands
    }

    pub fn hand(&self, seat: Seat) -> Option<&[Card]> {
        self.hands.get(seat.index()).map(Vec::as_slice)
    }

    pub fn num_players(&self) -> usize {
        self.hands.len()
    }

    /// Check that the hands partition a numbered deck of
    /// `hand_size * num_players` cards into equal, disjoint hands.
    pub fn validate(&self, hand_size: usize, num_players: usize) -> Result<(), DealError> {
        if self.hands.len() != num_players {
            return Err(DealError::PlayerCount {
                expected: num_players,
                found: self.hands.len(),
            });
        }

        for (index, hand) in self.hands.iter().enumerate() {
            if hand.len() != hand_size {
                return Err(DealError::HandSize {
                    seat: Seat::new(index),
                    expected: hand_size,
                    found: hand.len(),
                });
            }
        }

        let mut all: Vec<Card> = self.hands.iter().flatten().copied().collect();
        all.sort_unstable();
        if let Some(pair) = all.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(DealError::DuplicateCard(pair[0]));
        }

        // Enumerated deals number from 0, shuffled decks from 1.
        let base = match all.first() {
            Some(card) if card.rank() <= 1 => card.rank(),
            Some(card) => return Err(DealError::Universe(*card)),
            None => return Ok(()),
        };
        for (offset, card) in all.iter().enumerate() {
            if usize::from(card.rank() - base) != offset {
                return Err(DealError::Universe(*card));
            }
        }

        Ok(())
    }
}
