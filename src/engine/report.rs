use crate::game::board::{Board, CELLS};
use crate::game::encoding::cell_to_index;
use crate::game::minimax::best_indices;

/// Network output next to the minimax targets for one board, both taken
/// from the computer's side.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardReport {
    /// The board as the computer sees it, its own symbol as X.
    pub board: Board,
    pub predicted: Vec<f64>,
    pub optimal: [f64; CELLS],
    /// Whether every cell the network ranks best is also minimax-best.
    /// `None` on finished boards, where there is no move to judge.
    pub agrees: Option<bool>,
}

impl BoardReport {
    pub fn new(board: Board, predicted: Vec<f64>, optimal: [f64; CELLS]) -> BoardReport {
        let agrees = if board.status().is_terminal() {
            None
        } else {
            let empty: Vec<usize> = board.empty_cells().map(|(row, col)| cell_to_index(row, col)).collect();
            let chosen = best_indices(&predicted, empty.iter().copied());
            let optimal_best = best_indices(&optimal, empty.iter().copied());
            Some(chosen.iter().all(|index| optimal_best.contains(index)))
        };

        BoardReport { board, predicted, optimal, agrees }
    }

    /// predicted - optimal, per cell.
    pub fn difference(&self) -> Vec<f64> {
        self.predicted.iter().zip(&self.optimal).map(|(p, o)| p - o).collect()
    }

    pub fn mean_abs_error(&self) -> f64 {
        let diff = self.difference();
        diff.iter().map(|d| d.abs()).sum::<f64>() / diff.len() as f64
    }
}

/// How closely a trained network tracks minimax over a sample of boards.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub reports: Vec<BoardReport>,
}

impl Evaluation {
    /// Mean absolute per-cell error over all boards; 0.0 for no boards.
    pub fn mean_abs_error(&self) -> f64 {
        if self.reports.is_empty() {
            return 0.0;
        }
        self.reports.iter().map(BoardReport::mean_abs_error).sum::<f64>() / self.reports.len() as f64
    }

    /// Fraction of unfinished boards where the network's pick is optimal.
    /// `None` when every sampled board was finished.
    pub fn agreement(&self) -> Option<f64> {
        let judged: Vec<bool> = self.reports.iter().filter_map(|r| r.agrees).collect();
        if judged.is_empty() {
            return None;
        }
        Some(judged.iter().filter(|&&a| a).count() as f64 / judged.len() as f64)
    }
}
