use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::BoardParseError;

/// Side length of the board.
pub const SIZE: usize = 3;
/// Number of cells; cell `index` is `(index / SIZE, index % SIZE)`.
pub const CELLS: usize = SIZE * SIZE;

/// The 8 winning lines as (row, column) triples: rows, columns, diagonals.
pub const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    X,
    O,
    #[default]
    Empty,
}

impl Symbol {
    /// Text used when rendering a cell.
    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::X => "X",
            Symbol::O => "O",
            Symbol::Empty => " ",
        }
    }

    /// X <-> O. `Empty` stays `Empty`.
    pub fn opposite(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
            Symbol::Empty => Symbol::Empty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    InProgress,
    XWon,
    OWon,
    Draw,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        self != Status::InProgress
    }
}

/// 3x3 grid of symbols.
///
/// `Board` is `Copy`: search code probes moves on its own copy and never
/// mutates a board it was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Symbol; SIZE]; SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Symbol::Empty; SIZE]; SIZE],
        }
    }

    pub fn from_cells(cells: [[Symbol; SIZE]; SIZE]) -> Self {
        Board { cells }
    }

    /// Each cell drawn independently and uniformly from {X, O, Empty}.
    /// The result need not be reachable in real play.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut board = Board::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                board.cells[row][col] = match rng.gen_range(0..3) {
                    0 => Symbol::X,
                    1 => Symbol::O,
                    _ => Symbol::Empty,
                };
            }
        }
        board
    }

    pub fn cells(&self) -> &[[Symbol; SIZE]; SIZE] {
        &self.cells
    }

    /// # Panics
    /// Panics if `row` or `col` is not below `SIZE`.
    pub fn get(&self, row: usize, col: usize) -> Symbol {
        self.cells[row][col]
    }

    /// # Panics
    /// Panics if `row` or `col` is not below `SIZE`.
    pub fn set(&mut self, row: usize, col: usize, symbol: Symbol) {
        self.cells[row][col] = symbol;
    }

    /// Independent copy; mutating it never affects `self`.
    pub fn copy_board(&self) -> Board {
        *self
    }

    /// Copy of this board with one cell replaced.
    pub fn with(&self, row: usize, col: usize, symbol: Symbol) -> Board {
        let mut next = *self;
        next.set(row, col, symbol);
        next
    }

    /// Copy with X and O swapped.
    pub fn flipped(&self) -> Board {
        let mut next = *self;
        for cell in next.cells.iter_mut().flatten() {
            *cell = cell.opposite();
        }
        next
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        self.cells[row][col] == Symbol::Empty
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..CELLS)
            .map(|index| (index / SIZE, index % SIZE))
            .filter(|&(row, col)| self.is_empty_at(row, col))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&s| s != Symbol::Empty)
    }

    /// Symbol owning a complete line, if any. Lines are checked in `LINES`
    /// order, so a board with lines for both symbols reports the first.
    pub fn winner(&self) -> Option<Symbol> {
        for [a, b, c] in LINES {
            let sq = self.get(a.0, a.1);
            if sq != Symbol::Empty && sq == self.get(b.0, b.1) && sq == self.get(c.0, c.1) {
                return Some(sq);
            }
        }
        None
    }

    /// Derived from the cells on every call.
    pub fn status(&self) -> Status {
        match self.winner() {
            Some(Symbol::X) => Status::XWon,
            Some(Symbol::O) => Status::OWon,
            _ if self.is_full() => Status::Draw,
            _ => Status::InProgress,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            let line: Vec<&str> = row.iter().map(|s| s.as_str()).collect();
            writeln!(f, "{}", line.join("|"))?;
            if i < SIZE - 1 {
                writeln!(f, "-----")?;
            }
        }
        Ok(())
    }
}

/// Parses 9 cells in row-major order from `X`, `O` and `.` (or `_`) characters.
/// Whitespace and `|` are ignored, so `"XO.|...|..X"` and a 3-line grid both work.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut symbols = Vec::with_capacity(CELLS);
        for ch in s.chars() {
            match ch {
                'X' | 'x' => symbols.push(Symbol::X),
                'O' | 'o' => symbols.push(Symbol::O),
                '.' | '_' => symbols.push(Symbol::Empty),
                '|' => {}
                c if c.is_whitespace() => {}
                c => return Err(BoardParseError::InvalidChar(c)),
            }
        }
        if symbols.len() != CELLS {
            return Err(BoardParseError::CellCount(symbols.len()));
        }

        let mut board = Board::new();
        for (index, symbol) in symbols.into_iter().enumerate() {
            board.set(index / SIZE, index % SIZE, symbol);
        }
        Ok(board)
    }
}
