use super::{Policy, ResponseContext};
use onesuit_core::model::card::Card;
use onesuit_core::model::hand::{Hand, HandError};
use tracing::{Level, event};

/// Leads low; when responding, ducks under the running maximum with the
/// highest card that still fits.
///
/// With nothing below the maximum, a middle seat plays its lowest card while
/// the seat closing the trick dumps its highest. The two branches differ on
/// purpose and both are part of the strategy's measured results.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankAwarePolicy;

impl Policy for RankAwarePolicy {
    fn lead(&mut self, hand: &mut Hand) -> Result<Card, HandError> {
        hand.take_min()
    }

    fn respond(&mut self, hand: &mut Hand, ctx: ResponseContext) -> Result<Card, HandError> {
        let duck = hand.values_below(ctx.current_max).last().copied();
        let (card, reason) = match duck {
            Some(card) => {
                hand.remove(card)?;
                (card, "duck")
            }
            None if ctx.is_last_to_act => (hand.take_max()?, "dump_highest"),
            None => (hand.take_min()?, "sacrifice_lowest"),
        };
        event!(
            target: "onesuit_bot::policy",
            Level::TRACE,
            current_max = ctx.current_max.rank(),
            last = ctx.is_last_to_act,
            card = card.rank(),
            reason
        );
        Ok(card)
    }
}
