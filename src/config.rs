use std::path::Path;

use serde::{Serialize, Deserialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::game::board::{Symbol, CELLS};
use crate::network::spec::NetworkSpec;
use crate::train::train_config::{TrainConfig, DEFAULT_LOG_EVERY};

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 10;
pub const DEFAULT_EPOCHS_PER_LEVEL: usize = 1000;

/// How the computer picks its moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Highest-scoring empty cell of the trained network.
    #[default]
    Network,
    /// Exhaustive minimax; never loses.
    Minimax,
}

/// Engine configuration, loadable from JSON. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 1 (weakest) to 10; scales the number of training epochs.
    pub difficulty: u8,
    pub human_symbol: Symbol,
    /// Seeds both weight initialisation and all later random choices.
    pub seed: u64,
    pub epochs_per_level: usize,
    pub log_every: usize,
    pub strategy: Strategy,
    pub network: NetworkSpec,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            difficulty: 5,
            human_symbol: Symbol::X,
            seed: 42,
            epochs_per_level: DEFAULT_EPOCHS_PER_LEVEL,
            log_every: DEFAULT_LOG_EVERY,
            strategy: Strategy::Network,
            network: NetworkSpec::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.difficulty) {
            return Err(ConfigError::Difficulty(self.difficulty));
        }
        if self.human_symbol == Symbol::Empty {
            return Err(ConfigError::HumanSymbol);
        }
        if self.epochs_per_level == 0 {
            return Err(ConfigError::Validation(
                "epochs_per_level must be > 0".into(),
            ));
        }
        if self.network.input_size != CELLS || self.network.output_size != CELLS {
            return Err(ConfigError::Validation(format!(
                "network input and output sizes must both be {CELLS}"
            )));
        }
        if self.network.hidden_sizes.contains(&0) {
            return Err(ConfigError::Validation(
                "network.hidden_sizes must not contain 0".into(),
            ));
        }
        let learning_rate = self.network.learning_rate;
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(ConfigError::Validation(
                "network.learning_rate must be finite and > 0".into(),
            ));
        }
        Ok(())
    }

    /// difficulty × epochs_per_level
    pub fn epochs(&self) -> usize {
        self.difficulty as usize * self.epochs_per_level
    }

    /// Epochs and logging interval for a difficulty-scaled run.
    pub fn train_config(&self) -> TrainConfig {
        TrainConfig {
            epochs: self.epochs(),
            log_every: self.log_every,
        }
    }
}
