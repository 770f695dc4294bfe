//! Core type definitions for gradient-descent SVM training

use crate::core::{Result, SVMError};

/// Prediction result containing label and decision value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted class label (+1 or -1)
    pub label: f64,
    /// Raw decision function value (w . x)
    pub decision_value: f64,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: f64, decision_value: f64) -> Self {
        Self {
            label,
            decision_value,
        }
    }

    /// Get confidence as absolute value of decision value
    pub fn confidence(&self) -> f64 {
        self.decision_value.abs()
    }
}

/// An owned mini-batch of training rows with their labels
///
/// Rows are stored in a row-major flat buffer with stride `dim`. The row
/// order is whatever order the batch was assembled in (for sampled batches,
/// the randomized index order), not the dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    data: Vec<f64>,
    labels: Vec<f64>,
    dim: usize,
}

impl Batch {
    /// Assemble a batch from owned rows and labels
    ///
    /// All rows must share one width, and there must be exactly one label
    /// per row.
    pub fn from_rows(rows: Vec<Vec<f64>>, labels: Vec<f64>) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(SVMError::InvalidDataset(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }

        let dim = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * dim);
        for row in &rows {
            if row.len() != dim {
                return Err(SVMError::DimensionMismatch {
                    expected: dim,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self { data, labels, dim })
    }

    /// Assemble a batch directly from a flat row-major buffer
    pub(crate) fn from_parts(data: Vec<f64>, labels: Vec<f64>, dim: usize) -> Self {
        debug_assert_eq!(data.len(), labels.len() * dim);
        Self { data, labels, dim }
    }

    /// Number of rows in the batch
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the batch contains no rows
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row width (feature count)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get one row as a slice
    ///
    /// # Panics
    /// Panics if index >= len()
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.dim;
        &self.data[start..start + self.dim]
    }

    /// Labels in row order
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }
}

/// Configuration for gradient-descent training
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Penalty coefficient weighting the hinge-loss term
    pub c: f64,
    /// Learning rate for the optimizer
    pub learning_rate: f64,
    /// Momentum coefficient (0.0 disables momentum)
    pub momentum: f64,
    /// Mini-batch size drawn per iteration
    pub batch_size: usize,
    /// Fixed number of training iterations
    pub iterations: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            learning_rate: 0.05,
            momentum: 0.0,
            batch_size: 100,
            iterations: 500,
        }
    }
}

impl TrainConfig {
    /// Check that every hyperparameter is in its valid range
    pub fn validate(&self) -> Result<()> {
        if !(self.c > 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "penalty c must be positive, got {}",
                self.c
            )));
        }
        if !(self.learning_rate > 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(0.0..1.0).contains(&self.momentum) {
            return Err(SVMError::InvalidParameter(format!(
                "momentum must be in [0, 1), got {}",
                self.momentum
            )));
        }
        if self.batch_size == 0 {
            return Err(SVMError::InvalidParameter(
                "batch size must be at least 1".to_string(),
            ));
        }
        if self.iterations == 0 {
            return Err(SVMError::InvalidParameter(
                "iteration count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction() {
        let pred = Prediction::new(1.0, 2.5);
        assert_eq!(pred.label, 1.0);
        assert_eq!(pred.decision_value, 2.5);
        assert_eq!(pred.confidence(), 2.5);

        let neg_pred = Prediction::new(-1.0, -1.8);
        assert_eq!(neg_pred.confidence(), 1.8);
    }

    #[test]
    fn test_batch_from_rows() {
        let batch = Batch::from_rows(
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
            vec![1.0, -1.0, 1.0],
        )
        .unwrap();

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.dim(), 2);
        assert_eq!(batch.row(0), &[1.0, 2.0]);
        assert_eq!(batch.row(2), &[5.0, 6.0]);
        assert_eq!(batch.labels(), &[1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_batch_ragged_rows_rejected() {
        let result = Batch::from_rows(vec![vec![1.0, 2.0], vec![3.0]], vec![1.0, -1.0]);
        assert!(matches!(
            result,
            Err(SVMError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_batch_label_count_mismatch_rejected() {
        let result = Batch::from_rows(vec![vec![1.0]], vec![1.0, -1.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_batch_empty() {
        let batch = Batch::from_rows(Vec::new(), Vec::new()).unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.dim(), 0);
    }

    #[test]
    fn test_train_config_default() {
        let config = TrainConfig::default();
        assert_eq!(config.c, 1.0);
        assert_eq!(config.learning_rate, 0.05);
        assert_eq!(config.momentum, 0.0);
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.iterations, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_train_config_validation() {
        let bad_lr = TrainConfig {
            learning_rate: 0.0,
            ..TrainConfig::default()
        };
        assert!(bad_lr.validate().is_err());

        let bad_momentum = TrainConfig {
            momentum: 1.0,
            ..TrainConfig::default()
        };
        assert!(bad_momentum.validate().is_err());

        let bad_c = TrainConfig {
            c: -1.0,
            ..TrainConfig::default()
        };
        assert!(bad_c.validate().is_err());

        let bad_batch = TrainConfig {
            batch_size: 0,
            ..TrainConfig::default()
        };
        assert!(bad_batch.validate().is_err());

        let bad_iters = TrainConfig {
            iterations: 0,
            ..TrainConfig::default()
        };
        assert!(bad_iters.validate().is_err());
    }
}
