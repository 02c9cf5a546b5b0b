pub mod game;
pub mod player;
pub mod policy;

pub use game::{Game, GameError, GamePhase, seat_seeds};
pub use player::Player;
pub use policy::{Policy, ResponseContext, Strategy, StrategyKind};
