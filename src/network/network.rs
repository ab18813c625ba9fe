use rand::rngs::StdRng;
use rand::SeedableRng;
use rand::distributions::Open01;
use rand::Rng;

use crate::{
    activation::activation::ActivationFunction,
    error::NetworkError,
    layers::dense::Layer,
    loss::squared_error::SquaredErrorLoss,
    optim::sgd::Sgd,
    train::{loop_fn::train_loop, source::TrainingSource, train_config::TrainConfig},
};

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Feedforward network: a linear input layer, any number of sigmoid hidden
/// layers, and a sigmoid output layer.
///
/// Topology is fixed at construction. Only `initialize_weights` and the
/// training step change weights.
#[derive(Debug, Clone)]
pub struct Network {
    input: Layer,
    hidden: Vec<Layer>,
    output: Layer,
    optimizer: Sgd,
}

impl Network {
    /// Builds a network with zero-initialised weights and the default
    /// learning rate. Call `initialize_weights` before use.
    pub fn new(input_size: usize, hidden_sizes: &[usize], output_size: usize) -> Result<Network, NetworkError> {
        Network::with_learning_rate(input_size, hidden_sizes, output_size, DEFAULT_LEARNING_RATE)
    }

    pub fn with_learning_rate(
        input_size: usize,
        hidden_sizes: &[usize],
        output_size: usize,
        learning_rate: f64,
    ) -> Result<Network, NetworkError> {
        if input_size == 0 || output_size == 0 || hidden_sizes.contains(&0) {
            return Err(NetworkError::ZeroSizedLayer);
        }

        let input = Layer::new(input_size, 0, ActivationFunction::Linear);

        let mut previous = input_size;
        let hidden = hidden_sizes.iter()
            .map(|&size| {
                let layer = Layer::new(size, previous, ActivationFunction::Sigmoid);
                previous = size;
                layer
            })
            .collect();

        let output = Layer::new(output_size, previous, ActivationFunction::Sigmoid);

        Ok(Network { input, hidden, output, optimizer: Sgd::new(learning_rate) })
    }

    /// The classic three-layer shape: one hidden layer.
    pub fn single_hidden(input_size: usize, hidden_size: usize, output_size: usize) -> Result<Network, NetworkError> {
        Network::new(input_size, &[hidden_size], output_size)
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate
    }

    pub fn input_size(&self) -> usize {
        self.input.size
    }

    pub fn output_size(&self) -> usize {
        self.output.size
    }

    pub fn input_layer(&self) -> &Layer {
        &self.input
    }

    pub fn hidden_layers(&self) -> &[Layer] {
        &self.hidden
    }

    pub fn output_layer(&self) -> &Layer {
        &self.output
    }

    pub fn hidden_layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.hidden.get_mut(index)
    }

    pub fn output_layer_mut(&mut self) -> &mut Layer {
        &mut self.output
    }

    /// Fills every weight and bias with a sample from (0, 1).
    ///
    /// One generator seeded with `seed` is consumed hidden layers first (in
    /// order), then the output layer; within a layer, each neuron's weights
    /// row is drawn before its bias. Same seed and topology give the same
    /// weights.
    pub fn initialize_weights(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);

        for layer in self.hidden.iter_mut().chain(std::iter::once(&mut self.output)) {
            for i in 0..layer.size {
                for j in 0..layer.input_size() {
                    layer.set_weight(i, j, rng.sample(Open01));
                }
                layer.set_bias(i, rng.sample(Open01));
            }
        }
    }

    /// Forward pass. Leaves weights untouched; the per-neuron scratch state
    /// keeps this pass's activations for a following backward pass.
    pub fn feed_forward(&mut self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.input.set_outputs(input)?;

        for k in 0..self.hidden.len() {
            let (before, rest) = self.hidden.split_at_mut(k);
            let previous = before.last().unwrap_or(&self.input);
            rest[0].calculate_values(previous);
        }

        let previous = self.hidden.last().unwrap_or(&self.input);
        self.output.calculate_values(previous);

        Ok(self.output.outputs())
    }

    /// Computes every layer's error for the activations of the last forward
    /// pass, output layer first.
    pub fn backpropagate(&mut self, target: &[f64]) -> Result<(), NetworkError> {
        self.output.calculate_output_errors(target)?;

        for k in (0..self.hidden.len()).rev() {
            let (head, tail) = self.hidden.split_at_mut(k + 1);
            let next = tail.first().unwrap_or(&self.output);
            head[k].calculate_errors(next);
        }

        Ok(())
    }

    /// Applies one SGD update to every layer, output layer first.
    ///
    /// Must follow `backpropagate`: each update reads only its upstream
    /// layer's outputs, which updates never change, so all layers see the
    /// same forward-pass snapshot.
    pub fn update_weights(&mut self) {
        let previous = self.hidden.last().unwrap_or(&self.input);
        self.optimizer.step(&mut self.output, previous);

        for k in (0..self.hidden.len()).rev() {
            let (head, tail) = self.hidden.split_at_mut(k);
            let previous = head.last().unwrap_or(&self.input);
            self.optimizer.step(&mut tail[0], previous);
        }
    }

    /// One online training step. Returns the squared-error sum of the
    /// prediction made *before* the update.
    pub fn train_step(&mut self, input: &[f64], target: &[f64]) -> Result<f64, NetworkError> {
        if target.len() != self.output.size {
            return Err(NetworkError::TargetLength { expected: self.output.size, found: target.len() });
        }

        let predicted = self.feed_forward(input)?;
        let error = SquaredErrorLoss::loss(&predicted, target);

        self.backpropagate(target)?;
        self.update_weights();

        Ok(error)
    }

    /// Runs `epochs` training steps, drawing one example per epoch from
    /// `source`. `progress` receives `(epoch, squared_error)` once per epoch.
    ///
    /// Returns the squared error of the last epoch (0.0 when `epochs == 0`).
    pub fn train<S>(
        &mut self,
        epochs: usize,
        source: &mut S,
        progress: Option<&mut dyn FnMut(usize, f64)>,
    ) -> Result<f64, NetworkError>
    where
        S: TrainingSource + ?Sized,
    {
        let config = TrainConfig::new(epochs);
        let summary = train_loop(self, source, &config, progress)?;
        Ok(summary.final_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::Matrix;

    #[test]
    fn test_topology() {
        let network = Network::new(2, &[2, 3], 1).unwrap();
        assert_eq!(network.input_size(), 2);
        assert_eq!(network.output_size(), 1);
        let hidden: Vec<(usize, usize)> = network.hidden_layers().iter()
            .map(|l| (l.size, l.input_size()))
            .collect();
        assert_eq!(hidden, vec![(2, 2), (3, 2)]);
        assert_eq!(network.output_layer().input_size(), 3);
        assert_eq!(network.learning_rate(), DEFAULT_LEARNING_RATE);
    }

    #[test]
    fn test_zero_sized_layers_are_rejected() {
        assert_eq!(Network::new(0, &[2], 1).unwrap_err(), NetworkError::ZeroSizedLayer);
        assert_eq!(Network::new(2, &[2, 0], 1).unwrap_err(), NetworkError::ZeroSizedLayer);
        assert_eq!(Network::new(2, &[2], 0).unwrap_err(), NetworkError::ZeroSizedLayer);
    }

    #[test]
    fn test_no_hidden_layers_connects_input_to_output() {
        let mut network = Network::new(3, &[], 2).unwrap();
        assert_eq!(network.output_layer().input_size(), 3);
        network.initialize_weights(5);
        assert_eq!(network.feed_forward(&[0.1, 0.2, 0.3]).unwrap().len(), 2);
    }

    #[test]
    fn test_single_hidden_is_a_list_of_one() {
        let network = Network::single_hidden(9, 9, 9).unwrap();
        assert_eq!(network.hidden_layers().len(), 1);
        assert_eq!(network.hidden_layers()[0].size, 9);
    }

    #[test]
    fn test_initialize_weights_is_reproducible() {
        let mut a = Network::new(2, &[2, 3], 2).unwrap();
        let mut b = Network::new(2, &[2, 3], 2).unwrap();
        a.initialize_weights(123);
        b.initialize_weights(123);

        for (la, lb) in a.hidden_layers().iter().zip(b.hidden_layers()) {
            assert_eq!(la.weights(), lb.weights());
            assert_eq!(la.biases(), lb.biases());
        }
        assert_eq!(a.output_layer().weights(), b.output_layer().weights());

        let mut c = Network::new(2, &[2, 3], 2).unwrap();
        c.initialize_weights(124);
        assert_ne!(a.output_layer().weights(), c.output_layer().weights());
    }

    #[test]
    fn test_initialize_weights_in_open_unit_interval() {
        let mut network = Network::new(9, &[9], 9).unwrap();
        network.initialize_weights(1);
        let layer = network.output_layer();
        assert!(layer.weights().data.iter().flatten().all(|&w| w > 0.0 && w < 1.0));
        assert!(layer.biases().iter().all(|&b| b > 0.0 && b < 1.0));
    }

    #[test]
    fn test_initialize_weights_traversal_order() {
        let mut network = Network::new(2, &[1], 1).unwrap();
        network.initialize_weights(99);

        let mut rng = StdRng::seed_from_u64(99);
        let expected: Vec<f64> = (0..5).map(|_| rng.sample(Open01)).collect();

        let hidden = &network.hidden_layers()[0];
        assert_eq!(hidden.weights().get(0, 0), expected[0]);
        assert_eq!(hidden.weights().get(0, 1), expected[1]);
        assert_eq!(hidden.biases()[0], expected[2]);
        assert_eq!(network.output_layer().weights().get(0, 0), expected[3]);
        assert_eq!(network.output_layer().biases()[0], expected[4]);
    }

    #[test]
    fn test_feed_forward_is_deterministic() {
        let mut network = Network::new(2, &[2, 3], 2).unwrap();
        network.initialize_weights(222);

        let first = network.feed_forward(&[0.5, 0.8]).unwrap();
        let second = network.feed_forward(&[0.5, 0.8]).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|&y| (0.0..=1.0).contains(&y)));
    }

    #[test]
    fn test_feed_forward_known_values() {
        let mut network = Network::new(2, &[2], 1).unwrap();
        network.hidden_layer_mut(0).unwrap()
            .set_weights(Matrix::from_data(vec![vec![0.1, 0.2], vec![0.3, 0.4]]).unwrap())
            .unwrap();
        network.hidden_layer_mut(0).unwrap().set_biases(vec![0.5, 0.6]).unwrap();
        network.output_layer_mut()
            .set_weights(Matrix::from_data(vec![vec![1.0, -1.0]]).unwrap())
            .unwrap();
        network.output_layer_mut().set_biases(vec![0.0]).unwrap();

        let sigmoid = |x: f64| 1.0 / (1.0 + (-x).exp());
        let expected = sigmoid(sigmoid(0.71) - sigmoid(1.07));

        let out = network.feed_forward(&[0.5, 0.8]).unwrap();
        assert!((out[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_feed_forward_rejects_wrong_input_length() {
        let mut network = Network::new(2, &[2], 1).unwrap();
        assert_eq!(
            network.feed_forward(&[1.0, 2.0, 3.0]),
            Err(NetworkError::InputLength { expected: 2, found: 3 })
        );
    }

    #[test]
    fn test_train_step_rejects_wrong_target_length_before_updating() {
        let mut network = Network::new(2, &[2], 1).unwrap();
        network.initialize_weights(3);
        let before = network.output_layer().weights().clone();

        assert_eq!(
            network.train_step(&[0.5, 0.8], &[0.1, 0.2]),
            Err(NetworkError::TargetLength { expected: 1, found: 2 })
        );
        assert_eq!(network.output_layer().weights(), &before);
    }

    #[test]
    fn test_train_step_does_not_increase_error() {
        let mut network = Network::with_learning_rate(2, &[2, 3], 2, 0.01).unwrap();
        network.initialize_weights(123);
        let input = [0.5, 0.8];
        let target = [0.9, 0.3];

        let before = network.train_step(&input, &target).unwrap();
        let after = SquaredErrorLoss::loss(&network.feed_forward(&input).unwrap(), &target);
        assert!(after <= before, "error rose from {before} to {after}");
    }

    #[test]
    fn test_train_step_updates_every_layer() {
        let mut network = Network::new(2, &[2, 3], 1).unwrap();
        network.initialize_weights(7);
        let hidden_before: Vec<Matrix> = network.hidden_layers().iter().map(|l| l.weights().clone()).collect();
        let output_before = network.output_layer().weights().clone();

        network.train_step(&[0.5, 0.8], &[0.1]).unwrap();

        for (layer, before) in network.hidden_layers().iter().zip(&hidden_before) {
            assert_ne!(layer.weights(), before);
        }
        assert_ne!(network.output_layer().weights(), &output_before);
    }
}
