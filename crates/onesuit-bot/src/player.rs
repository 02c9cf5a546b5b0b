use crate::policy::{Policy, ResponseContext, Strategy, StrategyKind};
use onesuit_core::model::card::Card;
use onesuit_core::model::hand::{Hand, HandError};
use onesuit_core::model::seat::Seat;

/// A seat at the table: its hand and the strategy it was built with.
#[derive(Debug, Clone)]
pub struct Player {
    seat: Seat,
    hand: Hand,
    strategy: Strategy,
}

impl Player {
    pub fn new(seat: Seat, strategy: Strategy) -> Self {
        Self {
            seat,
            hand: Hand::new(),
            strategy,
        }
    }

    pub fn with_kind(seat: Seat, kind: StrategyKind, seed: u64) -> Self {
        Self::new(seat, Strategy::new(kind, seed))
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Start a new game holding exactly `cards`.
    pub fn reset(&mut self, cards: &[Card]) {
        self.hand.reset(cards.iter().copied());
    }

    pub fn lead(&mut self) -> Result<Card, HandError> {
        self.strategy.lead(&mut self.hand)
    }

    pub fn respond(&mut self, ctx: ResponseContext) -> Result<Card, HandError> {
        self.strategy.respond(&mut self.hand, ctx)
    }
}
