use crate::activation::activation::ActivationFunction;

/// One unit of a layer.
///
/// Input and error are accumulators: callers reset them with `set_input(0.0)`
/// / `set_error(0.0)` before summing a new pass into them. Weights live on the
/// owning `Layer`, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    input: f64,
    value: f64,
    error: f64,
    activator: ActivationFunction,
}

impl Neuron {
    pub fn new(activator: ActivationFunction) -> Neuron {
        Neuron {
            input: 0.0,
            value: 0.0,
            error: 0.0,
            activator,
        }
    }

    pub fn set_input(&mut self, input: f64) {
        self.input = input;
    }

    pub fn add_input(&mut self, delta: f64) {
        self.input += delta;
    }

    /// Overwrites the output directly, bypassing the activation. The input
    /// layer uses this to expose raw feature values.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    pub fn set_error(&mut self, error: f64) {
        self.error = error;
    }

    pub fn add_error(&mut self, delta: f64) {
        self.error += delta;
    }

    /// value = activation(input)
    pub fn calculate_output(&mut self) {
        self.value = self.activator.function(self.input);
    }

    /// error *= derivative(value)
    pub fn apply_derivative(&mut self) {
        self.error *= self.activator.derivative(self.value);
    }

    pub fn input(&self) -> f64 {
        self.input
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn activator(&self) -> ActivationFunction {
        self.activator
    }
}
