use super::{Policy, ResponseContext};
use onesuit_core::model::card::Card;
use onesuit_core::model::hand::{Hand, HandError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Always plays the lowest card held.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestPolicy;

impl Policy for LowestPolicy {
    fn lead(&mut self, hand: &mut Hand) -> Result<Card, HandError> {
        hand.take_min()
    }

    fn respond(&mut self, hand: &mut Hand, _ctx: ResponseContext) -> Result<Card, HandError> {
        hand.take_min()
    }
}

/// Always plays the highest card held.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestPolicy;

impl Policy for HighestPolicy {
    fn lead(&mut self, hand: &mut Hand) -> Result<Card, HandError> {
        hand.take_max()
    }

    fn respond(&mut self, hand: &mut Hand, _ctx: ResponseContext) -> Result<Card, HandError> {
        hand.take_max()
    }
}

/// Uniform pick from the hand, ignoring the trick.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    fn pick(&mut self, hand: &mut Hand) -> Result<Card, HandError> {
        let card = *hand.cards().choose(&mut self.rng).ok_or(HandError::Empty)?;
        hand.remove(card)?;
        Ok(card)
    }
}

impl Policy for RandomPolicy {
    fn lead(&mut self, hand: &mut Hand) -> Result<Card, HandError> {
        self.pick(hand)
    }

    fn respond(&mut self, hand: &mut Hand, _ctx: ResponseContext) -> Result<Card, HandError> {
        self.pick(hand)
    }
}
