//! Exhaustive minimax over 3x3 positions.
//!
//! No pruning: every continuation is explored, which is at most 9! leaves
//! from the empty board. X is always the maximizing side.

use tracing::debug;

use crate::game::board::{Board, Status, Symbol, CELLS, SIZE};

/// Score given to occupied cells in a target vector so they never rank as
/// the best move.
pub const OCCUPIED_SENTINEL: f64 = -1000.0;

/// Terminal payoffs. A draw is always worth 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scoring {
    pub win: f64,
}

impl Scoring {
    /// ±10, used to build training targets.
    pub const STANDARD: Scoring = Scoring { win: 10.0 };
    /// ±1, used when searching for a move directly.
    pub const UNIT: Scoring = Scoring { win: 1.0 };

    /// Payoff of a finished position from X's side; `None` while in progress.
    pub fn terminal(&self, status: Status) -> Option<f64> {
        match status {
            Status::XWon => Some(self.win),
            Status::OWon => Some(-self.win),
            Status::Draw => Some(0.0),
            Status::InProgress => None,
        }
    }
}

/// Value of `board` under perfect play, with X to move when `maximizing`
/// and O to move otherwise.
///
/// Each continuation is explored on its own copy of the board; `board` is
/// never modified.
pub fn minimax(board: &Board, maximizing: bool, scoring: Scoring) -> f64 {
    if let Some(score) = scoring.terminal(board.status()) {
        return score;
    }

    let (mover, mut best) = if maximizing {
        (Symbol::X, f64::NEG_INFINITY)
    } else {
        (Symbol::O, f64::INFINITY)
    };

    for (row, col) in board.empty_cells() {
        let child = board.with(row, col, mover);
        let score = minimax(&child, !maximizing, scoring);
        best = if maximizing { best.max(score) } else { best.min(score) };
    }

    best
}

/// Raw per-cell scores for X moving next on `board`.
///
/// Each empty cell gets the minimax value of the position after X plays
/// there (O then to move). Occupied cells get `OCCUPIED_SENTINEL`.
pub fn optimal_output(board: &Board) -> [f64; CELLS] {
    optimal_output_with(board, Scoring::STANDARD)
}

pub fn optimal_output_with(board: &Board, scoring: Scoring) -> [f64; CELLS] {
    let mut output = [OCCUPIED_SENTINEL; CELLS];
    for (row, col) in board.empty_cells() {
        let child = board.with(row, col, Symbol::X);
        output[row * SIZE + col] = minimax(&child, false, scoring);
    }
    output
}

/// `optimal_output` min-max normalised into [0, 1] for a sigmoid output
/// layer: `(score - min) / (max - min)` over this board's own 9 scores.
///
/// If all 9 scores are equal the range is zero and every target is 0.0.
/// Full boards (every cell holds the sentinel) hit this routinely during
/// training, as does the empty board.
pub fn scaled_optimal_output(board: &Board) -> [f64; CELLS] {
    scale_min_max(&optimal_output(board))
}

pub fn scale_min_max(scores: &[f64; CELLS]) -> [f64; CELLS] {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let range = max - min;

    if range == 0.0 {
        debug!(score = min, "all target scores equal, using zero targets");
        return [0.0; CELLS];
    }

    scores.map(|s| (s - min) / range)
}

/// Indices in `candidates` whose score equals the best score among them.
/// Order follows `candidates`; empty when `candidates` is empty.
pub fn best_indices(scores: &[f64], candidates: impl IntoIterator<Item = usize>) -> Vec<usize> {
    let mut best = f64::NEG_INFINITY;
    let mut indices = Vec::new();

    for index in candidates {
        let score = scores[index];
        if score > best {
            best = score;
            indices.clear();
            indices.push(index);
        } else if score == best {
            indices.push(index);
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_terminal_scores() {
        assert_eq!(minimax(&board("XXX|OO.|..."), false, Scoring::STANDARD), 10.0);
        assert_eq!(minimax(&board("OOO|XX.|X.."), true, Scoring::STANDARD), -10.0);
        assert_eq!(minimax(&board("XOX|XOO|OXX"), true, Scoring::STANDARD), 0.0);
        assert_eq!(minimax(&board("XXX|OO.|..."), false, Scoring::UNIT), 1.0);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        assert_eq!(minimax(&Board::new(), true, Scoring::UNIT), 0.0);
    }

    #[test]
    fn test_completing_two_in_a_row_is_the_best_cell() {
        // X has (0,0) and (0,1); (0,2) wins immediately.
        let b = board("XX.|OO.|...");
        let scores = optimal_output(&b);

        assert_eq!(scores[2], 10.0);
        let best = best_indices(&scores, b.empty_cells().map(|(r, c)| r * SIZE + c));
        assert!(best.contains(&2));
        assert!(scores.iter().all(|&s| s <= scores[2]));
    }

    #[test]
    fn test_blocking_is_required() {
        // O threatens the middle row; only (1,2) avoids losing.
        let b = board("X..|OO.|X..");
        let scores = optimal_output(&b);
        let best = best_indices(&scores, b.empty_cells().map(|(r, c)| r * SIZE + c));
        assert_eq!(best, vec![5]);
        assert!(scores[1] < 0.0);
    }

    #[test]
    fn test_occupied_cells_get_sentinel() {
        let b = board("XO.|...|...");
        let scores = optimal_output(&b);
        assert_eq!(scores[0], OCCUPIED_SENTINEL);
        assert_eq!(scores[1], OCCUPIED_SENTINEL);
        assert!(scores[2] > OCCUPIED_SENTINEL);
    }

    #[test]
    fn test_search_does_not_mutate_board() {
        let b = board("X..|.O.|...");
        let copy = b;
        let _ = optimal_output(&b);
        let _ = minimax(&b, true, Scoring::STANDARD);
        assert_eq!(b, copy);
    }

    #[test]
    fn test_scaled_output_in_unit_range() {
        let b = board("XX.|OO.|...");
        let scaled = scaled_optimal_output(&b);
        assert!(scaled.iter().all(|&s| (0.0..=1.0).contains(&s)));
        assert_eq!(scaled[2], 1.0);
        assert_eq!(scaled[0], 0.0);
    }

    #[test]
    fn test_scaled_output_guards_zero_range() {
        let full = board("XOX|XOO|OXX");
        let scaled = scaled_optimal_output(&full);
        assert_eq!(scaled, [0.0; CELLS]);
        assert!(scaled.iter().all(|s| !s.is_nan()));
    }

    struct CountWarnings(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for CountWarnings {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() <= Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_full_boards_scale_without_warnings() {
        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(CountWarnings(warnings.clone()));

        tracing::subscriber::with_default(subscriber, || {
            for full in ["XOX|XOO|OXX", "OOO|XXO|XXO", "XXX|XXX|XXX"] {
                assert_eq!(scaled_optimal_output(&board(full)), [0.0; CELLS]);
            }
            assert_eq!(scaled_optimal_output(&Board::new()), [0.0; CELLS]);
        });

        assert_eq!(warnings.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_scale_min_max() {
        let mut scores = [OCCUPIED_SENTINEL; CELLS];
        scores[4] = 0.0;
        scores[8] = 10.0;
        let scaled = scale_min_max(&scores);
        assert_eq!(scaled[0], 0.0);
        assert_eq!(scaled[8], 1.0);
        assert!((scaled[4] - 1000.0 / 1010.0).abs() < 1e-12);
    }

    #[test]
    fn test_best_indices_collects_ties() {
        let scores = [1.0, 3.0, 3.0, -1.0, 3.0];
        assert_eq!(best_indices(&scores, 0..5), vec![1, 2, 4]);
        assert_eq!(best_indices(&scores, [0, 3]), vec![0]);
        assert!(best_indices(&scores, []).is_empty());
    }
}
