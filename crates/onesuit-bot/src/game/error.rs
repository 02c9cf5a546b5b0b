use onesuit_core::model::deal::DealError;
use onesuit_core::model::hand::HandError;
use onesuit_core::model::seat::Seat;
use onesuit_core::model::trick::TrickError;
use std::fmt;

/// Contract violations. Any of these ends the game and the run that
/// started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    TooFewPlayers { found: usize },
    SeatOrder { index: usize, seat: Seat },
    Deal(DealError),
    Hand { seat: Seat, source: HandError },
    Trick(TrickError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::TooFewPlayers { found } => {
                write!(f, "a game needs at least two players, got {found}")
            }
            GameError::SeatOrder { index, seat } => {
                write!(f, "player at position {index} claims seat {seat}")
            }
            GameError::Deal(err) => write!(f, "invalid deal: {err}"),
            GameError::Hand { seat, source } => write!(f, "{seat}: {source}"),
            GameError::Trick(err) => write!(f, "trick bookkeeping failed: {err}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Deal(err) => Some(err),
            GameError::Hand { source, .. } => Some(source),
            GameError::Trick(err) => Some(err),
            GameError::TooFewPlayers { .. } | GameError::SeatOrder { .. } => None,
        }
    }
}

impl From<DealError> for GameError {
    fn from(err: DealError) -> Self {
        GameError::Deal(err)
    }
}

impl From<TrickError> for GameError {
    fn from(err: TrickError) -> Self {
        GameError::Trick(err)
    }
}
