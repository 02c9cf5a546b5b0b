use crate::model::seat::Seat;
use serde::{Deserialize, Serialize};

/// Tricks taken by each seat over one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameResult {
    tricks_lost: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl GameResult {
    pub fn new(tricks_lost: Vec<usize>) -> Self {
        Self { tricks_lost }
    }

    pub fn tricks_lost(&self) -> &[usize] {
        &self.tricks_lost
    }

    pub fn lost_by(&self, seat: Seat) -> usize {
        self.tricks_lost.get(seat.index()).copied().unwrap_or(0)
    }

    pub fn num_players(&self) -> usize {
        self.tricks_lost.len()
    }

    pub fn total(&self) -> usize {
        self.tricks_lost.iter().sum()
    }

    /// Every seat that took the fewest tricks.
    pub fn winners(&self) -> impl Iterator<Item = Seat> + '_ {
        let best = self.tricks_lost.iter().copied().min().unwrap_or(0);
        self.tricks_lost
            .iter()
            .enumerate()
            .filter(move |(_, lost)| **lost == best)
            .map(|(index, _)| Seat::new(index))
    }

    /// `seat` against the best of the other seats.
    pub fn outcome_for(&self, seat: Seat) -> Outcome {
        let mine = self.lost_by(seat);
        let best_other = self
            .tricks_lost
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != seat.index())
            .map(|(_, lost)| *lost)
            .min();
        match best_other {
            Some(other) if mine > other => Outcome::Loss,
            Some(other) if mine == other => Outcome::Draw,
            _ => Outcome::Win,
        }
    }
}
