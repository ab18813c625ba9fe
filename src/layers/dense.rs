use crate::{
    activation::activation::ActivationFunction,
    error::NetworkError,
    layers::neuron::Neuron,
    loss::squared_error::SquaredErrorLoss,
    math::matrix::Matrix,
};

/// Fully connected layer.
///
/// `weights` has shape `(size, input_size)`: row `i` holds the incoming
/// weights of neuron `i`, column `j` the connection from neuron `j` of the
/// previous layer. The input layer is built with `input_size == 0`.
#[derive(Debug, Clone)]
pub struct Layer{
    pub size: usize,
    input_size: usize,
    neurons: Vec<Neuron>,
    weights: Matrix,
    biases: Vec<f64>,
    activator: ActivationFunction
}

impl Layer {
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction) -> Layer {
        Layer {
            size,
            input_size,
            neurons: vec![Neuron::new(activation); size],
            weights: Matrix::zeros(size, input_size),
            biases: vec![0.0; size],
            activator: activation
        }
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn activator(&self) -> ActivationFunction {
        self.activator
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    /// Replaces the whole weight matrix. Fails without touching the layer if
    /// the shape is not `(size, input_size)`.
    pub fn set_weights(&mut self, weights: Matrix) -> Result<(), NetworkError> {
        let expected = (self.size, self.input_size);
        if weights.shape() != expected {
            return Err(NetworkError::WeightShape { expected, found: weights.shape() });
        }
        self.weights = weights;
        Ok(())
    }

    pub fn set_biases(&mut self, biases: Vec<f64>) -> Result<(), NetworkError> {
        if biases.len() != self.size {
            return Err(NetworkError::BiasLength { expected: self.size, found: biases.len() });
        }
        self.biases = biases;
        Ok(())
    }

    pub fn set_weight(&mut self, i: usize, j: usize, value: f64) {
        self.weights.set(i, j, value);
    }

    pub fn set_bias(&mut self, i: usize, value: f64) {
        self.biases[i] = value;
    }

    /// Writes `values` straight into the neuron outputs (identity pass-through).
    pub fn set_outputs(&mut self, values: &[f64]) -> Result<(), NetworkError> {
        if values.len() != self.size {
            return Err(NetworkError::InputLength { expected: self.size, found: values.len() });
        }
        for (neuron, &v) in self.neurons.iter_mut().zip(values) {
            neuron.set_input(v);
            neuron.set_value(v);
        }
        Ok(())
    }

    pub fn set_errors(&mut self, errors: &[f64]) -> Result<(), NetworkError> {
        if errors.len() != self.size {
            return Err(NetworkError::TargetLength { expected: self.size, found: errors.len() });
        }
        for (neuron, &e) in self.neurons.iter_mut().zip(errors) {
            neuron.set_error(e);
        }
        Ok(())
    }

    pub fn inputs(&self) -> Vec<f64> {
        self.neurons.iter().map(Neuron::input).collect()
    }

    pub fn outputs(&self) -> Vec<f64> {
        self.neurons.iter().map(Neuron::value).collect()
    }

    pub fn errors(&self) -> Vec<f64> {
        self.neurons.iter().map(Neuron::error).collect()
    }

    /// input[i] = bias[i] + sum_j weight[i][j] * previous.output[j]
    /// output[i] = activation(input[i])
    ///
    /// # Panics
    /// Panics if `previous.size != self.input_size()`.
    pub fn calculate_values(&mut self, previous: &Layer) {
        assert_eq!(previous.size, self.input_size, "previous layer size must match weight columns");

        for (i, neuron) in self.neurons.iter_mut().enumerate() {
            neuron.set_input(0.0);
            for (j, prev) in previous.neurons.iter().enumerate() {
                neuron.add_input(self.weights.data[i][j] * prev.value());
            }
            neuron.add_input(self.biases[i]);
            neuron.calculate_output();
        }
    }

    /// Back-propagates through the transpose of `next`'s weights:
    /// error[i] = derivative(output[i]) * sum_j next.error[j] * next.weight[j][i]
    ///
    /// # Panics
    /// Panics if `next.input_size() != self.size`.
    pub fn calculate_errors(&mut self, next: &Layer) {
        assert_eq!(next.input_size, self.size, "next layer weight columns must match this layer");

        for (i, neuron) in self.neurons.iter_mut().enumerate() {
            neuron.set_error(0.0);
            for (j, next_neuron) in next.neurons.iter().enumerate() {
                neuron.add_error(next_neuron.error() * next.weights.data[j][i]);
            }
            neuron.apply_derivative();
        }
    }

    /// Output-layer error against a direct target:
    /// error[i] = derivative(output[i]) * (output[i] - target[i])
    ///
    /// This is dE/d(input[i]) for E = 0.5 * sum (output - target)^2, so the
    /// subtraction in `update_weights_and_biases` descends the error surface.
    pub fn calculate_output_errors(&mut self, target: &[f64]) -> Result<(), NetworkError> {
        if target.len() != self.size {
            return Err(NetworkError::TargetLength { expected: self.size, found: target.len() });
        }
        let gradient = SquaredErrorLoss::derivative(&self.outputs(), target);
        for (neuron, g) in self.neurons.iter_mut().zip(gradient) {
            neuron.set_error(g);
            neuron.apply_derivative();
        }
        Ok(())
    }

    /// weight[i][j] -= lr * error[i] * previous.output[j]
    /// bias[i]      -= lr * error[i]
    pub fn update_weights_and_biases(&mut self, previous: &Layer, learning_rate: f64) {
        assert_eq!(previous.size, self.input_size, "previous layer size must match weight columns");

        for (i, neuron) in self.neurons.iter().enumerate() {
            let error = neuron.error();
            for (j, prev) in previous.neurons.iter().enumerate() {
                self.weights.data[i][j] -= learning_rate * error * prev.value();
            }
            self.biases[i] -= learning_rate * error;
        }
    }
}
