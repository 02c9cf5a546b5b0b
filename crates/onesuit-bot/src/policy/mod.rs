mod rank_aware;
mod simple;

pub use rank_aware::RankAwarePolicy;
pub use simple::{HighestPolicy, LowestPolicy, RandomPolicy};

use core::fmt;
use core::str::FromStr;
use onesuit_core::model::card::Card;
use onesuit_core::model::hand::{Hand, HandError};
use serde::{Deserialize, Serialize};

/// What a responder knows when it is their turn in a trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseContext {
    /// Highest card played so far in the trick.
    pub current_max: Card,
    /// The responder closes the trick.
    pub is_last_to_act: bool,
}

/// Card selection. Both calls remove the chosen card from `hand`.
pub trait Policy {
    fn lead(&mut self, hand: &mut Hand) -> Result<Card, HandError>;

    fn respond(&mut self, hand: &mut Hand, ctx: ResponseContext) -> Result<Card, HandError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Rank-aware play, see [`RankAwarePolicy`].
    #[default]
    Default,
    Lowest,
    Highest,
    Random,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Default,
        StrategyKind::Lowest,
        StrategyKind::Highest,
        StrategyKind::Random,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Default => "default",
            StrategyKind::Lowest => "lowest",
            StrategyKind::Highest => "highest",
            StrategyKind::Random => "random",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown strategy '{}' (expected default, lowest, highest or random)",
            self.0
        )
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

/// The closed set of policies a player can be built with.
#[derive(Debug, Clone)]
pub enum Strategy {
    RankAware(RankAwarePolicy),
    Lowest(LowestPolicy),
    Highest(HighestPolicy),
    Random(RandomPolicy),
}

impl Strategy {
    /// `seed` only matters for [`StrategyKind::Random`].
    pub fn new(kind: StrategyKind, seed: u64) -> Self {
        match kind {
            StrategyKind::Default => Strategy::RankAware(RankAwarePolicy),
            StrategyKind::Lowest => Strategy::Lowest(LowestPolicy),
            StrategyKind::Highest => Strategy::Highest(HighestPolicy),
            StrategyKind::Random => Strategy::Random(RandomPolicy::with_seed(seed)),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::RankAware(_) => StrategyKind::Default,
            Strategy::Lowest(_) => StrategyKind::Lowest,
            Strategy::Highest(_) => StrategyKind::Highest,
            Strategy::Random(_) => StrategyKind::Random,
        }
    }
}

impl Policy for Strategy {
    fn lead(&mut self, hand: &mut Hand) -> Result<Card, HandError> {
        match self {
            Strategy::RankAware(policy) => policy.lead(hand),
            Strategy::Lowest(policy) => policy.lead(hand),
            Strategy::Highest(policy) => policy.lead(hand),
            Strategy::Random(policy) => policy.lead(hand),
        }
    }

    fn respond(&mut self, hand: &mut Hand, ctx: ResponseContext) -> Result<Card, HandError> {
        match self {
            Strategy::RankAware(policy) => policy.respond(hand, ctx),
            Strategy::Lowest(policy) => policy.respond(hand, ctx),
            Strategy::Highest(policy) => policy.respond(hand, ctx),
            Strategy::Random(policy) => policy.respond(hand, ctx),
        }
    }
}
