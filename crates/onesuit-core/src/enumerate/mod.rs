//! Exhaustive deal generation.
//!
//! Seat 1's hand is chosen from the whole universe, seat 2's from what is
//! left, and so on; the last seat takes the remainder. Each level walks its
//! subsets in lexicographic order, so the sequence is the nested
//! `combinations` loop generalised to any number of players.

mod combinations;

pub use combinations::binomial;

use crate::model::card::Card;
use crate::model::deal::Deal;
use combinations::Combination;

/// Every partition of `{0 .. hand_size * num_players - 1}` into
/// `num_players` ordered hands of `hand_size` cards.
///
/// The enumerator holds no iteration state; each call to [`iter`](Self::iter)
/// starts a fresh walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealEnumerator {
    hand_size: usize,
    num_players: usize,
}

impl DealEnumerator {
    pub fn new(hand_size: usize, num_players: usize) -> Self {
        Self {
            hand_size,
            num_players,
        }
    }

    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    pub fn num_players(&self) -> usize {
        self.num_players
    }

    /// Length of the sequence, `C(hp, h) * C(h(p-1), h) * .. * C(h, h)`,
    /// or `None` if it does not fit in a `u128`.
    pub fn total(&self) -> Option<u128> {
        if self.num_players == 0 {
            return Some(0);
        }
        let hand = self.hand_size as u128;
        (1..=self.num_players as u128)
            .rev()
            .try_fold(1u128, |acc, remaining| {
                acc.checked_mul(binomial(hand.checked_mul(remaining)?, hand)?)
            })
    }

    pub fn universe(&self) -> Vec<Card> {
        (0..self.hand_size * self.num_players)
            .map(|rank| Card::new(rank as u16))
            .collect()
    }

    pub fn iter(&self) -> Deals {
        Deals::new(self.hand_size, self.num_players, self.universe())
    }
}

impl IntoIterator for &DealEnumerator {
    type Item = Deal;
    type IntoIter = Deals;

    fn into_iter(self) -> Deals {
        self.iter()
    }
}

impl IntoIterator for DealEnumerator {
    type Item = Deal;
    type IntoIter = Deals;

    fn into_iter(self) -> Deals {
        self.iter()
    }
}

/// Lazy walk over all deals of a [`DealEnumerator`].
#[derive(Debug, Clone)]
pub struct Deals {
    hand_size: usize,
    choosers: usize,
    levels: Vec<Level>,
    remainder: Vec<Card>,
    exhausted: bool,
}

#[derive(Debug, Clone)]
struct Level {
    pool: Vec<Card>,
    combination: Combination,
}

impl Deals {
    fn new(hand_size: usize, num_players: usize, universe: Vec<Card>) -> Self {
        let choosers = num_players.saturating_sub(1);
        let mut deals = Self {
            hand_size,
            choosers,
            levels: Vec::with_capacity(choosers),
            remainder: Vec::new(),
            exhausted: num_players == 0,
        };
        deals.descend(0, universe);
        deals
    }

    /// Reset every level from `depth` down to its first subset, starting
    /// from `pool`.
    fn descend(&mut self, depth: usize, mut pool: Vec<Card>) {
        self.levels.truncate(depth);
        for _ in depth..self.choosers {
            let combination = Combination::first(pool.len(), self.hand_size);
            let rest = combination.rest(&pool);
            self.levels.push(Level { pool, combination });
            pool = rest;
        }
        self.remainder = pool;
    }

    fn current(&self) -> Deal {
        let mut hands: Vec<Vec<Card>> = self
            .levels
            .iter()
            .map(|level| level.combination.select(&level.pool))
            .collect();
        hands.push(self.remainder.clone());
        Deal::new(hands)
    }

    /// Advance the deepest level that still has subsets left and restart
    /// everything below it.
    fn step(&mut self) {
        for depth in (0..self.levels.len()).rev() {
            let level = &mut self.levels[depth];
            if level.combination.advance() {
                let rest = level.combination.rest(&level.pool);
                self.descend(depth + 1, rest);
                return;
            }
        }
        self.exhausted = true;
    }
}

impl Iterator for Deals {
    type Item = Deal;

    fn next(&mut self) -> Option<Deal> {
        if self.exhausted {
            return None;
        }
        let deal = self.current();
        self.step();
        Some(deal)
    }
}

#[cfg(test)]
mod tests {
    use super::DealEnumerator;
    use crate::model::deal::Deal;
    use std::collections::HashSet;

    #[test]
    fn heads_up_single_card() {
        let deals: Vec<_> = DealEnumerator::new(1, 2).iter().collect();
        assert_eq!(
            deals,
            vec![Deal::from_ranks([[0], [1]]), Deal::from_ranks([[1], [0]])]
        );
    }

    #[test]
    fn heads_up_order_follows_first_hand() {
        let first_hands: Vec<Vec<u16>> = DealEnumerator::new(2, 2)
            .iter()
            .map(|deal| deal.hands()[0].iter().map(|c| c.rank()).collect())
            .collect();
        assert_eq!(
            first_hands,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
    }

    #[test]
    fn inner_seats_vary_fastest() {
        let deals: Vec<_> = DealEnumerator::new(1, 3).iter().take(3).collect();
        assert_eq!(
            deals,
            vec![
                Deal::from_ranks([[0], [1], [2]]),
                Deal::from_ranks([[0], [2], [1]]),
                Deal::from_ranks([[1], [0], [2]]),
            ]
        );
    }

    #[test]
    fn counts_match_binomial_products() {
        for (hand_size, players, expected) in [
            (1, 2, 2u128),
            (2, 2, 6),
            (3, 2, 20),
            (1, 4, 24),
            (2, 3, 90),
            (2, 4, 2520),
        ] {
            let enumerator = DealEnumerator::new(hand_size, players);
            assert_eq!(enumerator.total(), Some(expected));
            let deals: HashSet<_> = enumerator.iter().collect();
            assert_eq!(deals.len() as u128, expected, "h={hand_size} p={players}");
            assert!(deals.iter().all(|deal| deal.validate(hand_size, players).is_ok()));
        }
    }

    #[test]
    fn iteration_is_restartable() {
        let enumerator = DealEnumerator::new(2, 3);
        let first: Vec<_> = enumerator.iter().collect();
        let second: Vec<_> = (&enumerator).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn degenerate_tables() {
        assert_eq!(DealEnumerator::new(3, 0).iter().count(), 0);
        assert_eq!(DealEnumerator::new(3, 0).total(), Some(0));
        let solo: Vec<_> = DealEnumerator::new(2, 1).iter().collect();
        assert_eq!(solo, vec![Deal::from_ranks([[0, 1]])]);
    }

    #[test]
    fn total_reports_overflow() {
        assert_eq!(DealEnumerator::new(60, 4).total(), None);
        assert!(DealEnumerator::new(13, 4).total().is_some());
    }
}
