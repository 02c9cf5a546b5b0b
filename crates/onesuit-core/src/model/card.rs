use core::fmt;
use serde::{Deserialize, Serialize};

/// A ranked card. Single suit, so the rank is the whole identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(u16);

impl Card {
    pub const fn new(rank: u16) -> Self {
        Self(rank)
    }

    pub const fn rank(self) -> u16 {
        self.0
    }
}

impl From<u16> for Card {
    fn from(rank: u16) -> Self {
        Self(rank)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
