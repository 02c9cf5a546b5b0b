mod error;
mod resolver;

pub use error::GameError;
pub use resolver::{Game, GamePhase, seat_seeds};
