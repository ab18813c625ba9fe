use std::time::Instant;

use tracing::{debug, info};

use crate::error::NetworkError;
use crate::network::network::Network;
use crate::train::source::TrainingSource;
use crate::train::summary::TrainSummary;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` online for `config.epochs` epochs.
///
/// Each epoch draws one example from `source`, runs a forward pass, reports
/// the squared-error sum through `progress` as `(epoch, error)` with a
/// 0-based epoch index, back-propagates and updates every layer. Epochs run
/// strictly in sequence; the only state carried between them is the weights.
///
/// Passing `None` for `progress` does not change what training does.
///
/// # Errors
/// Fails on the first example whose input or target length does not match
/// the network; epochs already run keep their updates.
pub fn train_loop<S>(
    network: &mut Network,
    source: &mut S,
    config: &TrainConfig,
    mut progress: Option<&mut dyn FnMut(usize, f64)>,
) -> Result<TrainSummary, NetworkError>
where
    S: TrainingSource + ?Sized,
{
    info!(
        epochs = config.epochs,
        learning_rate = network.learning_rate(),
        "training started"
    );

    let t_start = Instant::now();
    let mut last_error = 0.0;
    let mut total_error = 0.0;

    for epoch in 0..config.epochs {
        let (input, target) = source.sample();

        let error = network.train_step(&input, &target)?;
        last_error = error;
        total_error += error;

        if let Some(callback) = progress.as_deref_mut() {
            callback(epoch, error);
        }

        if config.log_every > 0 && (epoch + 1) % config.log_every == 0 {
            debug!(epoch = epoch + 1, error, "training progress");
        }
    }

    let summary = TrainSummary {
        epochs: config.epochs,
        final_error: last_error,
        mean_error: mean(total_error, config.epochs),
        elapsed_ms: t_start.elapsed().as_millis() as u64,
    };

    info!(
        epochs = summary.epochs,
        final_error = summary.final_error,
        mean_error = summary.mean_error,
        elapsed_ms = summary.elapsed_ms,
        "training finished"
    );

    Ok(summary)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn mean(total: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        total / n as f64
    }
}
