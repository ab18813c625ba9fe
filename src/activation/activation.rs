use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Activation attached to every neuron of a layer.
///
/// Both `function()` and `derivative()` are element-wise. The derivative is
/// expressed in terms of the activation's *output*, since that is the value a
/// neuron still holds when its error is back-propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    /// Identity pass-through; used by the input layer.
    Linear,
    /// Logistic sigmoid, range (0, 1).
    Sigmoid,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Linear => x,
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
        }
    }

    /// Derivative evaluated at an output value `y = function(x)`.
    pub fn derivative(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Linear => 1.0,
            ActivationFunction::Sigmoid => y * (1.0 - y),
        }
    }
}
