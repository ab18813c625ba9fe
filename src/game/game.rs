use serde::{Serialize, Deserialize};

use crate::error::MoveError;
use crate::game::board::{Board, Status, Symbol, SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opposite(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn symbol(self) -> Symbol {
        match self {
            Player::X => Symbol::X,
            Player::O => Symbol::O,
        }
    }
}

/// One match: a board plus whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current: Player,
}

impl Game {
    pub fn new(first: Player) -> Self {
        Game {
            board: Board::new(),
            current: first,
        }
    }

    /// Resumes from an existing position.
    pub fn from_board(board: Board, current: Player) -> Self {
        Game { board, current }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Recomputed from the board on every call.
    pub fn check_status(&self) -> Status {
        self.board.status()
    }

    /// Bounds check plus cell-empty check. Never mutates.
    pub fn validate_move(&self, row: usize, column: usize) -> Result<(), MoveError> {
        if row >= SIZE || column >= SIZE {
            return Err(MoveError::OutOfBounds { row, column });
        }
        if !self.board.is_empty_at(row, column) {
            return Err(MoveError::Occupied { row, column });
        }
        if self.check_status().is_terminal() {
            return Err(MoveError::GameOver);
        }
        Ok(())
    }

    /// Places the current player's symbol and passes the turn. On error the
    /// game is unchanged.
    pub fn try_move(&mut self, row: usize, column: usize) -> Result<Status, MoveError> {
        self.validate_move(row, column)?;
        self.board.set(row, column, self.current.symbol());
        self.current = self.current.opposite();
        Ok(self.check_status())
    }

    /// `try_move` folded to a success flag, for callers that just re-prompt.
    pub fn make_move(&mut self, row: usize, column: usize) -> bool {
        self.try_move(row, column).is_ok()
    }
}
