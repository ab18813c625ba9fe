use rand::Rng;

use crate::game::board::Board;
use crate::game::encoding::encode;
use crate::game::minimax::scaled_optimal_output;
use crate::train::source::TrainingSource;

/// Training examples from random boards labelled by exhaustive minimax.
///
/// Each sample is a fresh random board (cells uniform over X/O/Empty), its
/// encoding as the input, and its scaled per-cell minimax scores with X to
/// move as the target.
pub struct MinimaxTargets<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> MinimaxTargets<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        MinimaxTargets { rng }
    }

    pub fn next_board(&mut self) -> Board {
        Board::random(&mut *self.rng)
    }
}

impl<R: Rng + ?Sized> TrainingSource for MinimaxTargets<'_, R> {
    fn sample(&mut self) -> (Vec<f64>, Vec<f64>) {
        let board = self.next_board();
        (encode(&board), scaled_optimal_output(&board).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::game::board::Symbol;

    #[test]
    fn test_samples_are_nine_wide_and_scaled() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut source = MinimaxTargets::new(&mut rng);
        for _ in 0..20 {
            let (input, target) = source.sample();
            assert_eq!(input.len(), 9);
            assert_eq!(target.len(), 9);
            assert!(input.iter().all(|v| [-1.0, 0.0, 1.0].contains(v)));
            assert!(target.iter().all(|t| (0.0..=1.0).contains(t)));
        }
    }

    #[test]
    fn test_samples_are_reproducible_from_seed() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        let xs: Vec<_> = (0..5).map(|_| MinimaxTargets::new(&mut a).sample()).collect();
        let ys: Vec<_> = (0..5).map(|_| MinimaxTargets::new(&mut b).sample()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_occupied_cells_target_zero_when_a_move_exists() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut source = MinimaxTargets::new(&mut rng);
        for _ in 0..20 {
            let board = source.next_board();
            let target = scaled_optimal_output(&board);
            if board.is_full() {
                continue;
            }
            for (index, symbol) in board.cells().iter().flatten().enumerate() {
                if *symbol != Symbol::Empty {
                    assert_eq!(target[index], 0.0);
                }
            }
        }
    }
}
