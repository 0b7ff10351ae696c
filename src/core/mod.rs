pub mod board;
pub mod error;
pub mod r#move;
pub mod types;

pub use board::{Board, CELLS};
pub use error::GameError;
pub use r#move::Move;
pub use types::{GameResult, Player};
