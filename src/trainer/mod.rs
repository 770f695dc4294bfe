//! Training loop
//!
//! Composes the sampler, the model, and the optimizer: every iteration draws
//! one mini-batch, computes the sub-gradient on it, and replaces the model
//! weights with the optimizer's update. Training always runs the configured
//! number of iterations; there is no convergence test.

use crate::core::{Dataset, Result, TrainConfig};
use crate::model::LinearSvm;
use crate::optimizer::GdOptimizer;
use crate::sampler::BatchSampler;
use crate::utils::validation;
use log::debug;
use rand::Rng;

/// Iterations between training progress log lines
const PROGRESS_LOG_INTERVAL: usize = 100;

/// Gradient-descent trainer for the linear SVM
pub struct GdTrainer {
    config: TrainConfig,
}

impl GdTrainer {
    /// Create a trainer from a validated configuration
    pub fn new(config: TrainConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The training configuration
    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Train an SVM on the dataset
    ///
    /// The supplied random source drives weight initialization and every
    /// batch draw; seeding it makes the whole run reproducible.
    pub fn train<D: Dataset, R: Rng>(&self, dataset: &D, rng: &mut R) -> Result<LinearSvm> {
        validation::validate_binary_labels(dataset)?;

        let sampler = BatchSampler::new(dataset, self.config.batch_size)?;
        let mut svm = LinearSvm::new(self.config.c, dataset.dim(), rng)?;
        let mut optimizer = GdOptimizer::new(self.config.learning_rate, self.config.momentum)?;

        for iteration in 0..self.config.iterations {
            let batch = sampler.get_batch(rng, None)?;
            let grad = svm.grad(&batch)?;
            let updated = optimizer.update_params(svm.weights(), &grad)?;
            svm.set_weights(updated)?;

            if (iteration + 1) % PROGRESS_LOG_INTERVAL == 0 {
                let losses = svm.hinge_loss(&batch)?;
                let mean = losses.iter().sum::<f64>() / losses.len() as f64;
                debug!(
                    "iteration {}/{}: mean batch hinge loss {:.6}",
                    iteration + 1,
                    self.config.iterations,
                    mean
                );
            }
        }

        Ok(svm)
    }
}

/// Descend the quadratic test function f(w) = 0.01 * w^2 and record the path
///
/// Returns the parameter history including the starting point, so the result
/// has `steps + 1` entries. Useful for comparing optimizer settings: with
/// momentum the trajectory overshoots and re-converges, without it the decay
/// is monotone.
pub fn quadratic_trace(
    optimizer: &mut GdOptimizer,
    w_init: f64,
    steps: usize,
) -> Result<Vec<f64>> {
    let mut w = w_init;
    let mut history = Vec::with_capacity(steps + 1);
    history.push(w);

    for _ in 0..steps {
        let grad = 0.02 * w;
        w = optimizer.update_params(&[w], &[grad])?[0];
        history.push(w);
    }

    Ok(history)
}
