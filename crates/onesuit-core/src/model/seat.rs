use core::fmt;
use serde::{Deserialize, Serialize};

/// Stable player identity: the index of the player's seat at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seat(usize);

impl Seat {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    /// Seat that acts after this one at a table of `players`.
    pub const fn next(self, players: usize) -> Seat {
        Seat((self.0 + 1) % players)
    }

    pub const fn previous(self, players: usize) -> Seat {
        Seat((self.0 + players - 1) % players)
    }

    /// Seats in play order starting from `self`.
    pub fn rotation(self, players: usize) -> impl Iterator<Item = Seat> {
        (0..players).map(move |offset| Seat((self.0 + offset) % players))
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::Seat;

    #[test]
    fn next_wraps_around() {
        assert_eq!(Seat::new(3).next(4), Seat::new(0));
        assert_eq!(Seat::new(1).next(2), Seat::new(0));
    }

    #[test]
    fn previous_wraps_around() {
        assert_eq!(Seat::new(0).previous(4), Seat::new(3));
        assert_eq!(Seat::new(2).previous(3), Seat::new(1));
    }

    #[test]
    fn rotation_starts_at_self() {
        let order: Vec<_> = Seat::new(2).rotation(4).map(Seat::index).collect();
        assert_eq!(order, vec![2, 3, 0, 1]);
    }

    #[test]
    fn display_is_one_based() {
        assert_eq!(Seat::new(0).to_string(), "P1");
    }
}
