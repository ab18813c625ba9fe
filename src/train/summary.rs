use serde::{Serialize, Deserialize};

/// What a finished `train_loop` run reports back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainSummary {
    /// Epochs actually run.
    pub epochs: usize,
    /// Squared-error sum of the last epoch, measured before its update.
    pub final_error: f64,
    /// Mean squared-error sum over all epochs.
    pub mean_error: f64,
    /// Wall-clock duration of the whole run in milliseconds.
    pub elapsed_ms: u64,
}
