use serde::{Serialize, Deserialize};

use crate::layers::dense::Layer;

/// Plain online stochastic gradient descent: no momentum, no batching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update to `layer` from its stored errors and the outputs
    /// `previous` produced in the same forward pass.
    pub fn step(&self, layer: &mut Layer, previous: &Layer) {
        layer.update_weights_and_biases(previous, self.learning_rate);
    }
}
