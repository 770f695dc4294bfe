//! Gradient-descent optimization with momentum
//!
//! Implements the heavy-ball update: the optimizer keeps a velocity that
//! decays by the momentum coefficient and accumulates learning-rate-scaled
//! gradients, and every step subtracts the velocity from the parameters.

use crate::core::{Result, SVMError};

/// Gradient descent optimizer with momentum
///
/// One instance carries one velocity stream. Do not share an instance across
/// unrelated parameter sets; the accumulated velocity only makes sense for a
/// single sequence of parameters.
#[derive(Debug, Clone)]
pub struct GdOptimizer {
    learning_rate: f64,
    momentum: f64,
    velocity: Vec<f64>,
}

impl GdOptimizer {
    /// Create an optimizer with the given learning rate and momentum
    ///
    /// Requires `learning_rate > 0` and `0 <= momentum < 1`. A momentum of
    /// 0.0 degenerates to plain gradient descent.
    pub fn new(learning_rate: f64, momentum: f64) -> Result<Self> {
        if !(learning_rate > 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "learning rate must be positive, got {learning_rate}"
            )));
        }
        if !(0.0..1.0).contains(&momentum) {
            return Err(SVMError::InvalidParameter(format!(
                "momentum must be in [0, 1), got {momentum}"
            )));
        }
        Ok(Self {
            learning_rate,
            momentum,
            velocity: Vec::new(),
        })
    }

    /// The configured learning rate
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// The configured momentum coefficient
    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    /// Current velocity; empty until the first update
    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    /// Clear the velocity so the instance can start a fresh parameter stream
    pub fn reset(&mut self) {
        self.velocity.clear();
    }

    /// Perform one descent step and return the updated parameters
    ///
    /// Updates the persistent velocity first:
    /// `velocity = momentum * velocity + learning_rate * grad`,
    /// then returns `params - velocity`. `params` is not mutated.
    ///
    /// The velocity takes the parameter shape on the first call; after that,
    /// a different shape is a dimension mismatch.
    pub fn update_params(&mut self, params: &[f64], grad: &[f64]) -> Result<Vec<f64>> {
        if params.len() != grad.len() {
            return Err(SVMError::DimensionMismatch {
                expected: params.len(),
                actual: grad.len(),
            });
        }
        if self.velocity.is_empty() {
            self.velocity = vec![0.0; params.len()];
        } else if self.velocity.len() != params.len() {
            return Err(SVMError::DimensionMismatch {
                expected: self.velocity.len(),
                actual: params.len(),
            });
        }

        for (v, &g) in self.velocity.iter_mut().zip(grad) {
            *v = self.momentum * *v + self.learning_rate * g;
        }

        Ok(params
            .iter()
            .zip(&self.velocity)
            .map(|(&p, &v)| p - v)
            .collect())
    }
}
