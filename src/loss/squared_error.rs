pub struct SquaredErrorLoss;

impl SquaredErrorLoss {
    /// Scalar loss: sum((expected - predicted)²), not averaged.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (b - a).powi(2))
            .sum::<f64>()
    }

    /// Per-output gradient of `0.5 * loss`: predicted - expected
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| a - b)
            .collect()
    }
}
