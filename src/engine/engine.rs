use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{info, trace};

use crate::config::{EngineConfig, Strategy};
use crate::engine::targets::MinimaxTargets;
use crate::error::{ConfigError, NetworkError};
use crate::game::board::{Board, Symbol};
use crate::game::encoding::{cell_to_index, encode_for, index_to_cell};
use crate::game::game::{Game, Player};
use crate::engine::report::{BoardReport, Evaluation};
use crate::game::minimax::{best_indices, optimal_output_with, scaled_optimal_output, Scoring};
use crate::network::network::Network;
use crate::train::loop_fn::train_loop;
use crate::train::summary::TrainSummary;
use crate::train::train_config::TrainConfig;

/// The computer player: a network trained on minimax targets plus the
/// seeded generator behind every random choice it makes.
#[derive(Debug)]
pub struct Engine {
    network: Network,
    config: EngineConfig,
    computer_symbol: Symbol,
    rng: StdRng,
}

impl Engine {
    /// Validates `config`, builds the network and seeds its weights.
    /// The network is untrained until `train` or `train_for_difficulty`.
    pub fn new(config: EngineConfig) -> Result<Engine, ConfigError> {
        config.validate()?;

        let mut network = config.network.build()?;
        network.initialize_weights(config.seed);

        info!(
            difficulty = config.difficulty,
            human = ?config.human_symbol,
            seed = config.seed,
            "engine created"
        );

        Ok(Engine {
            network,
            computer_symbol: config.human_symbol.opposite(),
            rng: StdRng::seed_from_u64(config.seed),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn human_symbol(&self) -> Symbol {
        self.config.human_symbol
    }

    pub fn computer_symbol(&self) -> Symbol {
        self.computer_symbol
    }

    /// Trains on `epochs` random boards labelled by minimax.
    pub fn train(
        &mut self,
        epochs: usize,
        progress: Option<&mut dyn FnMut(usize, f64)>,
    ) -> Result<TrainSummary, NetworkError> {
        let config = TrainConfig { epochs, ..self.config.train_config() };
        let mut source = MinimaxTargets::new(&mut self.rng);
        train_loop(&mut self.network, &mut source, &config, progress)
    }

    /// Trains for the epoch count implied by the configured difficulty.
    pub fn train_for_difficulty(
        &mut self,
        progress: Option<&mut dyn FnMut(usize, f64)>,
    ) -> Result<TrainSummary, NetworkError> {
        self.train(self.config.epochs(), progress)
    }

    /// Network scores for the 9 cells, with the computer's own symbol
    /// encoded as X.
    pub fn feed_forward(&mut self, board: &Board) -> Result<Vec<f64>, NetworkError> {
        let input = encode_for(board, self.computer_symbol);
        self.network.feed_forward(&input)
    }

    /// Scores `samples` random boards with the network and with minimax,
    /// both from the computer's side, drawing boards from the engine's rng.
    pub fn evaluate(&mut self, samples: usize) -> Result<Evaluation, NetworkError> {
        let mut reports = Vec::with_capacity(samples);
        for _ in 0..samples {
            let board = Board::random(&mut self.rng);
            let predicted = self.feed_forward(&board)?;
            let perspective = self.perspective(&board);
            reports.push(BoardReport::new(perspective, predicted, scaled_optimal_output(&perspective)));
        }

        let evaluation = Evaluation { reports };
        info!(
            samples,
            mean_abs_error = evaluation.mean_abs_error(),
            agreement = ?evaluation.agreement(),
            "evaluation finished"
        );
        Ok(evaluation)
    }

    /// `board` with the computer's symbol as X.
    fn perspective(&self, board: &Board) -> Board {
        match self.computer_symbol {
            Symbol::O => board.flipped(),
            _ => *board,
        }
    }

    /// A game with a randomly chosen first player.
    pub fn new_game(&mut self) -> Game {
        let first = if self.rng.gen_bool(0.5) { Player::X } else { Player::O };
        Game::new(first)
    }

    /// Picks a move with the configured strategy. `None` when the board has
    /// no empty cell.
    pub fn select_move(&mut self, game: &Game) -> Result<Option<(usize, usize)>, NetworkError> {
        match self.config.strategy {
            Strategy::Network => self.choose_move(game),
            Strategy::Minimax => Ok(self.optimal_move(game)),
        }
    }

    /// Highest network score among the empty cells, ties broken uniformly at
    /// random.
    pub fn choose_move(&mut self, game: &Game) -> Result<Option<(usize, usize)>, NetworkError> {
        let board = *game.board();
        let scores = self.feed_forward(&board)?;
        let candidates = board.empty_cells().map(|(row, col)| cell_to_index(row, col));
        let best = best_indices(&scores, candidates);

        let choice = best.choose(&mut self.rng).map(|&index| index_to_cell(index));
        trace!(?scores, ?best, ?choice, "network move");
        Ok(choice)
    }

    /// Best move by exhaustive minimax from the computer's side, ties broken
    /// uniformly at random.
    pub fn optimal_move(&mut self, game: &Game) -> Option<(usize, usize)> {
        let board = *game.board();
        let scores = optimal_output_with(&self.perspective(&board), Scoring::UNIT);
        let candidates = board.empty_cells().map(|(row, col)| cell_to_index(row, col));
        let best = best_indices(&scores, candidates);

        let choice = best.choose(&mut self.rng).map(|&index| index_to_cell(index));
        trace!(?scores, ?best, ?choice, "minimax move");
        choice
    }
}
