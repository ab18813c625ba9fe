use serde::{Serialize, Deserialize};

/// Default interval, in epochs, between `debug!` progress lines.
pub const DEFAULT_LOG_EVERY: usize = 1000;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`    — number of online steps; one example per epoch
/// - `log_every` — emit a `debug!` progress line every this many epochs;
///                 `0` disables periodic logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    pub log_every: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            log_every: DEFAULT_LOG_EVERY,
        }
    }
}
