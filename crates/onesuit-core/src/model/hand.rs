use crate::model::card::Card;
use std::fmt;
use std::vec::Vec;

/// Cards held by one player, kept sorted by rank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandError {
    Empty,
    NotInHand(Card),
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::Empty => write!(f, "hand is empty"),
            HandError::NotInHand(card) => write!(f, "card {card} is not in hand"),
        }
    }
}

impl std::error::Error for HandError {}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    /// Replace the whole hand. Nothing from the previous holding survives.
    pub fn reset(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.clear();
        self.cards.extend(cards);
        self.sort();
    }

    pub fn remove(&mut self, card: Card) -> Result<(), HandError> {
        let index = self
            .cards
            .binary_search(&card)
            .map_err(|_| HandError::NotInHand(card))?;
        self.cards.remove(index);
        Ok(())
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.binary_search(&card).is_ok()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn min(&self) -> Result<Card, HandError> {
        self.cards.first().copied().ok_or(HandError::Empty)
    }

    pub fn max(&self) -> Result<Card, HandError> {
        self.cards.last().copied().ok_or(HandError::Empty)
    }

    /// Cards ranked strictly below `threshold`, lowest first.
    pub fn values_below(&self, threshold: Card) -> &[Card] {
        let end = self.cards.partition_point(|&card| card < threshold);
        &self.cards[..end]
    }

    pub fn take_min(&mut self) -> Result<Card, HandError> {
        let card = self.min()?;
        self.cards.remove(0);
        Ok(card)
    }

    pub fn take_max(&mut self) -> Result<Card, HandError> {
        let card = self.cards.pop().ok_or(HandError::Empty)?;
        Ok(card)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn sort(&mut self) {
        self.cards.sort_unstable();
    }
}

#[cfg(test)]
mod tests {
    use super::{Hand, HandError};
    use crate::model::card::Card;

    fn hand(ranks: &[u16]) -> Hand {
        Hand::with_cards(ranks.iter().copied().map(Card::new).collect())
    }

    #[test]
    fn cards_are_sorted_by_rank() {
        let hand = hand(&[9, 2, 5]);
        let ordered: Vec<_> = hand.iter().map(|c| c.rank()).collect();
        assert_eq!(ordered, vec![2, 5, 9]);
    }

    #[test]
    fn remove_missing_card_errors() {
        let mut hand = hand(&[1, 4]);
        assert_eq!(
            hand.remove(Card::new(3)),
            Err(HandError::NotInHand(Card::new(3)))
        );
        assert!(hand.remove(Card::new(4)).is_ok());
        assert!(!hand.contains(Card::new(4)));
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn min_and_max_fail_on_empty_hand() {
        let mut hand = Hand::new();
        assert_eq!(hand.min(), Err(HandError::Empty));
        assert_eq!(hand.max(), Err(HandError::Empty));
        assert_eq!(hand.take_min(), Err(HandError::Empty));
        assert_eq!(hand.take_max(), Err(HandError::Empty));
    }

    #[test]
    fn take_removes_extremes() {
        let mut hand = hand(&[3, 8, 6]);
        assert_eq!(hand.take_max(), Ok(Card::new(8)));
        assert_eq!(hand.take_min(), Ok(Card::new(3)));
        assert_eq!(hand.cards(), &[Card::new(6)]);
    }

    #[test]
    fn values_below_is_strict() {
        let hand = hand(&[1, 4, 6, 9]);
        assert_eq!(hand.values_below(Card::new(6)), &[Card::new(1), Card::new(4)]);
        assert!(hand.values_below(Card::new(1)).is_empty());
        assert_eq!(hand.values_below(Card::new(100)).len(), 4);
    }

    #[test]
    fn reset_overwrites_previous_cards() {
        let mut hand = hand(&[1, 2]);
        hand.reset([Card::new(7), Card::new(5)]);
        assert_eq!(hand.cards(), &[Card::new(5), Card::new(7)]);
    }
}
