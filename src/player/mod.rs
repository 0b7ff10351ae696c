pub mod ai;
pub mod controller;

pub use ai::{Engine, HeuristicAI, MinimaxAI};
pub use controller::PlayerController;
