use serde::{Serialize, Deserialize};

use std::path::Path;

use crate::error::{ConfigError, NetworkError};
use crate::network::network::{Network, DEFAULT_LEARNING_RATE};

/// A serializable description of a network topology.
///
/// Only the shape and learning rate are stored; trained weights are never
/// written out.
///
/// Fields:
/// - `input_size`    — neurons in the linear input layer
/// - `hidden_sizes`  — sigmoid hidden layers, input side first
/// - `output_size`   — neurons in the sigmoid output layer
/// - `learning_rate` — SGD step size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub input_size: usize,
    pub hidden_sizes: Vec<usize>,
    pub output_size: usize,
    pub learning_rate: f64,
}

impl Default for NetworkSpec {
    /// 9 → [9] → 9, learning rate 0.1: one input and one output per cell.
    fn default() -> Self {
        NetworkSpec {
            input_size: 9,
            hidden_sizes: vec![9],
            output_size: 9,
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }
}

impl NetworkSpec {
    /// Builds an untrained network with zeroed weights.
    pub fn build(&self) -> Result<Network, NetworkError> {
        Network::with_learning_rate(
            self.input_size,
            &self.hidden_sizes,
            self.output_size,
            self.learning_rate,
        )
    }

    /// Reads a topology from a JSON file. Missing fields are an error;
    /// a topology file describes the whole network.
    pub fn load_json(path: &Path) -> Result<NetworkSpec, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
