pub mod board;
pub mod encoding;
pub mod game;
pub mod minimax;

pub use board::{Board, Status, Symbol, CELLS, SIZE};
pub use game::{Game, Player};
pub use minimax::{minimax, optimal_output, scaled_optimal_output, Scoring};
