pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod game;
pub mod engine;
pub mod config;
pub mod error;
pub mod play;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::{dense::Layer, neuron::Neuron};
pub use network::{network::Network, spec::NetworkSpec};
pub use loss::squared_error::SquaredErrorLoss;
pub use optim::sgd::Sgd;
pub use train::{loop_fn::train_loop, source::{FixedExample, TrainingSource}, summary::TrainSummary, train_config::TrainConfig};
pub use game::{board::{Board, Status, Symbol}, game::{Game, Player}};
pub use engine::{engine::Engine, report::{BoardReport, Evaluation}, targets::MinimaxTargets};
pub use config::{EngineConfig, Strategy};
pub use error::{BoardParseError, ConfigError, MoveError, NetworkError, PlayError};
pub use play::{play_game, BoardRenderer, MoveSource, Opponent};
