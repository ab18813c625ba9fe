//! Board <-> network vector conversion.

use crate::game::board::{Board, Symbol, CELLS, SIZE};

/// X → 1.0, O → -1.0, Empty → 0.0
pub fn symbol_value(symbol: Symbol) -> f64 {
    match symbol {
        Symbol::X => 1.0,
        Symbol::O => -1.0,
        Symbol::Empty => 0.0,
    }
}

/// Row-major encoding of the 9 cells.
pub fn encode(board: &Board) -> Vec<f64> {
    board.cells().iter().flatten().map(|&s| symbol_value(s)).collect()
}

/// Encodes from `me`'s point of view: `me` is written as X. Networks are
/// trained with X as the side to move, so this lets the same network play O.
pub fn encode_for(board: &Board, me: Symbol) -> Vec<f64> {
    match me {
        Symbol::O => encode(&board.flipped()),
        _ => encode(board),
    }
}

pub fn index_to_cell(index: usize) -> (usize, usize) {
    debug_assert!(index < CELLS);
    (index / SIZE, index % SIZE)
}

pub fn cell_to_index(row: usize, col: usize) -> usize {
    row * SIZE + col
}
