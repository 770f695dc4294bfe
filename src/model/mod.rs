//! Linear SVM model
//!
//! Holds the weight vector and the penalty coefficient, and provides the
//! hinge loss, its sub-gradient, and classification decisions. There is no
//! explicit bias term: callers fold the bias into the features by prepending
//! a constant column (see `DenseDataset::with_bias_column`).

use crate::core::{Batch, Prediction, Result, SVMError};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Standard deviation for random weight initialization
const WEIGHT_INIT_STD: f64 = 0.1;

/// Linear support vector machine with hinge loss
#[derive(Debug, Clone)]
pub struct LinearSvm {
    c: f64,
    weights: Vec<f64>,
}

impl LinearSvm {
    /// Create an SVM with weights drawn from Normal(0, 0.1)
    pub fn new<R: Rng>(c: f64, feature_count: usize, rng: &mut R) -> Result<Self> {
        if feature_count == 0 {
            return Err(SVMError::InvalidParameter(
                "feature count must be at least 1".to_string(),
            ));
        }
        let normal = Normal::new(0.0, WEIGHT_INIT_STD)
            .map_err(|e| SVMError::InvalidParameter(e.to_string()))?;
        let weights = (0..feature_count).map(|_| normal.sample(rng)).collect();
        Self::with_weights(c, weights)
    }

    /// Create an SVM with explicit weights
    pub fn with_weights(c: f64, weights: Vec<f64>) -> Result<Self> {
        if !(c > 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "penalty c must be positive, got {c}"
            )));
        }
        if weights.is_empty() {
            return Err(SVMError::InvalidParameter(
                "weight vector must not be empty".to_string(),
            ));
        }
        Ok(Self { c, weights })
    }

    /// The penalty coefficient
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Number of features the model expects
    pub fn feature_count(&self) -> usize {
        self.weights.len()
    }

    /// Current weight vector
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Replace the weight vector wholesale
    ///
    /// The replacement must have the same length as the current weights.
    pub fn set_weights(&mut self, weights: Vec<f64>) -> Result<()> {
        if weights.len() != self.weights.len() {
            return Err(SVMError::DimensionMismatch {
                expected: self.weights.len(),
                actual: weights.len(),
            });
        }
        self.weights = weights;
        Ok(())
    }

    /// Raw decision function value w . x for a single row
    pub fn decision_function(&self, x: &[f64]) -> Result<f64> {
        if x.len() != self.weights.len() {
            return Err(SVMError::DimensionMismatch {
                expected: self.weights.len(),
                actual: x.len(),
            });
        }
        Ok(self.weights.iter().zip(x).map(|(&w, &v)| w * v).sum())
    }

    /// Predict a single row
    pub fn predict(&self, x: &[f64]) -> Result<Prediction> {
        let decision_value = self.decision_function(x)?;
        let label = if decision_value >= 0.0 { 1.0 } else { -1.0 };
        Ok(Prediction::new(label, decision_value))
    }

    /// Per-row hinge loss max(1 - y * (w . x), 0) over a batch
    pub fn hinge_loss(&self, batch: &Batch) -> Result<Vec<f64>> {
        self.check_dim(batch)?;
        let mut losses = Vec::with_capacity(batch.len());
        for i in 0..batch.len() {
            let margin: f64 = self
                .weights
                .iter()
                .zip(batch.row(i))
                .map(|(&w, &v)| w * v)
                .sum();
            losses.push((1.0 - batch.labels()[i] * margin).max(0.0));
        }
        Ok(losses)
    }

    /// Sub-gradient of the regularized objective over a batch
    ///
    /// A row contributes y * x when its hinge loss is positive and nothing
    /// when the loss is exactly 0 (the flat side of the hinge, including the
    /// kink). The result is `w - (c / n) * sum(contributions)`.
    pub fn grad(&self, batch: &Batch) -> Result<Vec<f64>> {
        if batch.is_empty() {
            return Err(SVMError::EmptyDataset);
        }
        let losses = self.hinge_loss(batch)?;

        let mut acc = vec![0.0; self.weights.len()];
        for (i, &loss) in losses.iter().enumerate() {
            if loss > 0.0 {
                let y = batch.labels()[i];
                for (a, &x) in acc.iter_mut().zip(batch.row(i)) {
                    *a += y * x;
                }
            }
        }

        let scale = self.c / batch.len() as f64;
        Ok(self
            .weights
            .iter()
            .zip(&acc)
            .map(|(&w, &a)| w - scale * a)
            .collect())
    }

    /// Classify every row of a batch as +1 or -1
    ///
    /// A decision value of exactly 0 resolves to +1.
    pub fn classify(&self, batch: &Batch) -> Result<Vec<f64>> {
        self.check_dim(batch)?;
        let mut labels = Vec::with_capacity(batch.len());
        for i in 0..batch.len() {
            let decision: f64 = self
                .weights
                .iter()
                .zip(batch.row(i))
                .map(|(&w, &v)| w * v)
                .sum();
            labels.push(if decision >= 0.0 { 1.0 } else { -1.0 });
        }
        Ok(labels)
    }

    fn check_dim(&self, batch: &Batch) -> Result<()> {
        if !batch.is_empty() && batch.dim() != self.weights.len() {
            return Err(SVMError::DimensionMismatch {
                expected: self.weights.len(),
                actual: batch.dim(),
            });
        }
        Ok(())
    }
}
