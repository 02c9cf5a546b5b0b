pub mod card;
pub mod deal;
pub mod deck;
pub mod hand;
pub mod result;
pub mod seat;
pub mod trick;
