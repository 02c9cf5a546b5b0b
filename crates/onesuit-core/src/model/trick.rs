use crate::model::card::Card;
use crate::model::seat::Seat;
use std::fmt;

/// One card from every player, in rotation from the leader.
#[derive(Debug, Clone)]
pub struct Trick {
    leader: Seat,
    players: usize,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    Incomplete,
    OutOfTurn { expected: Seat, actual: Seat },
    AlreadyPlayed(Seat),
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::Incomplete => write!(f, "trick is still missing plays"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            TrickError::AlreadyPlayed(seat) => {
                write!(f, "{seat} has already played this trick")
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(leader: Seat, players: usize) -> Self {
        Self {
            leader,
            players,
            plays: Vec::with_capacity(players),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == self.players
    }

    /// Highest card played so far.
    pub fn current_max(&self) -> Option<Card> {
        self.plays.iter().map(|play| play.card).max()
    }

    /// The seat just before the leader closes the trick.
    pub fn is_last_to_act(&self, seat: Seat) -> bool {
        seat == self.leader.previous(self.players)
    }

    pub fn expected_seat(&self) -> Option<Seat> {
        if self.is_complete() {
            return None;
        }
        Some(
            self.plays
                .last()
                .map(|play| play.seat.next(self.players))
                .unwrap_or(self.leader),
        )
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        let Some(expected) = self.expected_seat() else {
            return Err(TrickError::TrickComplete);
        };

        if self.plays.iter().any(|play| play.seat == seat) {
            return Err(TrickError::AlreadyPlayed(seat));
        }

        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        self.plays.push(Play { seat, card });
        Ok(())
    }

    /// The seat that played the highest card takes the trick. Ranks are
    /// unique across the deck, so there is never a tie.
    pub fn loser(&self) -> Result<Seat, TrickError> {
        if !self.is_complete() {
            return Err(TrickError::Incomplete);
        }
        self.plays
            .iter()
            .max_by_key(|play| play.card)
            .map(|play| play.seat)
            .ok_or(TrickError::Incomplete)
    }
}

#[cfg(test)]
mod tests {
    use super::{Trick, TrickError};
    use crate::model::card::Card;
    use crate::model::seat::Seat;

    #[test]
    fn plays_follow_turn_order() {
        let mut trick = Trick::new(Seat::new(2), 4);
        assert!(trick.play(Seat::new(2), Card::new(5)).is_ok());
        assert!(matches!(
            trick.play(Seat::new(0), Card::new(3)),
            Err(TrickError::OutOfTurn { .. })
        ));
        assert_eq!(trick.expected_seat(), Some(Seat::new(3)));
    }

    #[test]
    fn repeated_seat_is_rejected() {
        let mut trick = Trick::new(Seat::new(0), 2);
        trick.play(Seat::new(0), Card::new(1)).unwrap();
        assert_eq!(
            trick.play(Seat::new(0), Card::new(2)),
            Err(TrickError::AlreadyPlayed(Seat::new(0)))
        );
    }

    #[test]
    fn highest_card_loses_the_trick() {
        let mut trick = Trick::new(Seat::new(1), 3);
        assert_eq!(trick.loser(), Err(TrickError::Incomplete));
        trick.play(Seat::new(1), Card::new(4)).unwrap();
        trick.play(Seat::new(2), Card::new(9)).unwrap();
        assert_eq!(trick.current_max(), Some(Card::new(9)));
        trick.play(Seat::new(0), Card::new(2)).unwrap();
        assert!(trick.is_complete());
        assert_eq!(trick.loser(), Ok(Seat::new(2)));
        assert_eq!(
            trick.play(Seat::new(1), Card::new(7)),
            Err(TrickError::TrickComplete)
        );
    }

    #[test]
    fn last_to_act_precedes_leader() {
        let trick = Trick::new(Seat::new(0), 4);
        assert!(trick.is_last_to_act(Seat::new(3)));
        assert!(!trick.is_last_to_act(Seat::new(2)));
        let heads_up = Trick::new(Seat::new(1), 2);
        assert!(heads_up.is_last_to_act(Seat::new(0)));
    }
}
