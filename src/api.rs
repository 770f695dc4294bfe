//! High-level API for training and evaluating the SVM
//!
//! This module provides a user-friendly interface for common tasks:
//! configuring a training run, fitting on a dataset, and evaluating the
//! resulting model.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gdsvm::api::SVM;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Train a model on CSV data (last column is the label)
//! let model = SVM::new()
//!     .with_c(1.0)
//!     .with_learning_rate(0.05)
//!     .with_iterations(500)
//!     .with_seed(1847)
//!     .train_from_csv("train.csv")?;
//!
//! // Evaluate on held-out data
//! let test = gdsvm::DenseDataset::from_csv_file("test.csv")?;
//! println!("Accuracy: {:.2}%", model.evaluate(&test)? * 100.0);
//! # Ok(())
//! # }
//! ```

use crate::core::{Batch, Dataset, Prediction, Result, TrainConfig};
use crate::data::DenseDataset;
use crate::model::LinearSvm;
use crate::trainer::GdTrainer;
use crate::utils::scaling::{ScalingMethod, ScalingParams};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

/// High-level SVM training interface with builder pattern
pub struct SVM {
    config: TrainConfig,
    seed: Option<u64>,
    feature_scaling: Option<ScalingMethod>,
    add_bias: bool,
}

impl SVM {
    /// Create a new builder with default training parameters
    pub fn new() -> Self {
        Self {
            config: TrainConfig::default(),
            seed: None,
            feature_scaling: None,
            add_bias: false,
        }
    }

    /// Set penalty coefficient c
    pub fn with_c(mut self, c: f64) -> Self {
        self.config.c = c;
        self
    }

    /// Set optimizer learning rate
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    /// Set optimizer momentum coefficient
    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.config.momentum = momentum;
        self
    }

    /// Set mini-batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    /// Set the fixed number of training iterations
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.config.iterations = iterations;
        self
    }

    /// Seed the random source for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Scale features before training; the same scaling is applied at
    /// prediction time
    pub fn with_feature_scaling(mut self, method: ScalingMethod) -> Self {
        self.feature_scaling = Some(method);
        self
    }

    /// Fold a bias term into the features by prepending a constant column
    pub fn with_bias_column(mut self) -> Self {
        self.add_bias = true;
        self
    }

    /// Train on a dataset
    pub fn train<D: Dataset>(self, dataset: &D) -> Result<TrainedModel> {
        let scaling = match self.feature_scaling {
            Some(method) => Some(ScalingParams::fit(dataset, method)?),
            None => None,
        };

        let mut prepared = match &scaling {
            Some(params) => params.transform(dataset)?,
            None => to_dense(dataset)?,
        };
        if self.add_bias {
            prepared = prepared.with_bias_column();
        }

        let trainer = GdTrainer::new(self.config)?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let svm = trainer.train(&prepared, &mut rng)?;

        Ok(TrainedModel {
            svm,
            scaling,
            add_bias: self.add_bias,
        })
    }

    /// Train from a CSV file (last column is the label)
    pub fn train_from_csv<P: AsRef<Path>>(self, path: P) -> Result<TrainedModel> {
        let dataset = DenseDataset::from_csv_file(path)?;
        self.train(&dataset)
    }
}

impl Default for SVM {
    fn default() -> Self {
        Self::new()
    }
}

/// Trained SVM with the preprocessing pipeline baked in
///
/// Inputs to every method are rows in the original feature space; feature
/// scaling and the bias column are applied internally before the model sees
/// them.
pub struct TrainedModel {
    svm: LinearSvm,
    scaling: Option<ScalingParams>,
    add_bias: bool,
}

impl TrainedModel {
    /// Predict a single feature row
    pub fn predict(&self, x: &[f64]) -> Result<Prediction> {
        let row = self.prepare_row(x)?;
        self.svm.predict(&row)
    }

    /// Classify every row of a dataset, in dataset order
    pub fn classify_dataset<D: Dataset>(&self, dataset: &D) -> Result<Vec<f64>> {
        let batch = self.prepare_batch(dataset)?;
        self.svm.classify(&batch)
    }

    /// Mean hinge loss over a dataset
    pub fn mean_hinge_loss<D: Dataset>(&self, dataset: &D) -> Result<f64> {
        let batch = self.prepare_batch(dataset)?;
        let losses = self.svm.hinge_loss(&batch)?;
        Ok(losses.iter().sum::<f64>() / losses.len().max(1) as f64)
    }

    /// Evaluate accuracy on a dataset
    pub fn evaluate<D: Dataset>(&self, dataset: &D) -> Result<f64> {
        let predicted = self.classify_dataset(dataset)?;
        let correct = predicted
            .iter()
            .zip(dataset.labels())
            .filter(|(pred, actual)| pred == actual)
            .count();
        Ok(correct as f64 / dataset.len() as f64)
    }

    /// Evaluate accuracy on a CSV file
    pub fn evaluate_from_csv<P: AsRef<Path>>(&self, path: P) -> Result<f64> {
        let dataset = DenseDataset::from_csv_file(path)?;
        self.evaluate(&dataset)
    }

    /// Confusion-matrix metrics on a dataset
    pub fn evaluate_detailed<D: Dataset>(&self, dataset: &D) -> Result<EvaluationMetrics> {
        let predicted = self.classify_dataset(dataset)?;
        Ok(EvaluationMetrics::from_predictions(
            &predicted,
            dataset.labels(),
        ))
    }

    /// Get model information
    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            feature_count: self.svm.feature_count(),
            weight_norm: self
                .svm
                .weights()
                .iter()
                .map(|&w| w * w)
                .sum::<f64>()
                .sqrt(),
        }
    }

    /// Current weight vector (in the prepared feature space)
    pub fn weights(&self) -> &[f64] {
        self.svm.weights()
    }

    /// Get the underlying trained model
    pub fn inner(&self) -> &LinearSvm {
        &self.svm
    }

    fn prepare_row(&self, x: &[f64]) -> Result<Vec<f64>> {
        let mut row = match &self.scaling {
            Some(params) => params.transform_row(x)?,
            None => x.to_vec(),
        };
        if self.add_bias {
            row.insert(0, 1.0);
        }
        Ok(row)
    }

    fn prepare_batch<D: Dataset>(&self, dataset: &D) -> Result<Batch> {
        let mut rows = Vec::with_capacity(dataset.len());
        for i in 0..dataset.len() {
            rows.push(self.prepare_row(dataset.row(i))?);
        }
        Batch::from_rows(rows, dataset.labels().to_vec())
    }
}

/// Materialize any dataset view as an owned dense dataset
fn to_dense<D: Dataset>(dataset: &D) -> Result<DenseDataset> {
    let rows = (0..dataset.len()).map(|i| dataset.row(i).to_vec()).collect();
    DenseDataset::from_rows(rows, dataset.labels().to_vec())
}

/// Confusion-matrix counts for a binary classifier
///
/// Derived rates treat an empty denominator as 0 rather than NaN, so the
/// metrics stay printable on degenerate datasets.
#[derive(Debug, Clone, Default)]
pub struct EvaluationMetrics {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl EvaluationMetrics {
    /// Tally predicted labels against reference labels, paired by position
    pub fn from_predictions(predicted: &[f64], actual: &[f64]) -> Self {
        let mut counts = Self::default();
        for (&pred, &truth) in predicted.iter().zip(actual) {
            match (pred > 0.0, truth > 0.0) {
                (true, true) => counts.true_positives += 1,
                (false, false) => counts.true_negatives += 1,
                (true, false) => counts.false_positives += 1,
                (false, true) => counts.false_negatives += 1,
            }
        }
        counts
    }

    /// Fraction of rows classified correctly
    pub fn accuracy(&self) -> f64 {
        let correct = self.true_positives + self.true_negatives;
        ratio(correct, correct + self.false_positives + self.false_negatives)
    }

    /// Fraction of predicted positives that really are positive
    pub fn precision(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_positives,
        )
    }

    /// Fraction of actual positives the model recovers
    pub fn recall(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_negatives,
        )
    }

    /// Harmonic mean of precision and recall
    pub fn f1_score(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    /// Fraction of actual negatives classified as negative
    pub fn specificity(&self) -> f64 {
        ratio(
            self.true_negatives,
            self.true_negatives + self.false_positives,
        )
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Model information
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub feature_count: usize,
    pub weight_norm: f64,
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;

    /// Train on CSV data with default parameters and a fixed seed
    ///
    /// The batch size is clamped to the dataset size so small files train
    /// out of the box.
    pub fn train_csv<P: AsRef<Path>>(path: P) -> Result<TrainedModel> {
        let dataset = DenseDataset::from_csv_file(path)?;
        let batch_size = TrainConfig::default().batch_size.min(dataset.len());
        SVM::new()
            .with_batch_size(batch_size)
            .with_seed(0)
            .train(&dataset)
    }

    /// Quick evaluation: train on a training file, test on a test file
    pub fn evaluate_split<P1: AsRef<Path>, P2: AsRef<Path>>(
        train_path: P1,
        test_path: P2,
    ) -> Result<f64> {
        let model = train_csv(train_path)?;
        model.evaluate_from_csv(test_path)
    }

    /// Random split validation: train on a fraction, report held-out accuracy
    pub fn split_validation<D: Dataset>(
        dataset: &D,
        train_ratio: f64,
        c: f64,
        seed: u64,
    ) -> Result<f64> {
        let dense = to_dense(dataset)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let (train, test) = dense.split(train_ratio, &mut rng)?;

        let batch_size = TrainConfig::default().batch_size.min(train.len());
        let model = SVM::new()
            .with_c(c)
            .with_batch_size(batch_size)
            .with_seed(seed)
            .train(&train)?;
        model.evaluate(&test)
    }
}
