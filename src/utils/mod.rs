//! Utility functions for dataset preparation

use crate::core::{Dataset, Result, SVMError};
use crate::data::DenseDataset;

/// Feature scaling utilities
pub mod scaling {
    use super::*;

    /// Supported per-column scaling rules
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum ScalingMethod {
        /// Linear rescale of each column into [min_val, max_val]
        MinMax { min_val: f64, max_val: f64 },
        /// Center on the column mean and divide by its sample std
        StandardScore,
        /// Divide by the column's largest absolute value
        UnitScale,
    }

    impl Default for ScalingMethod {
        fn default() -> Self {
            Self::MinMax {
                min_val: -1.0,
                max_val: 1.0,
            }
        }
    }

    /// Statistics for a single feature column
    #[derive(Debug, Clone)]
    pub struct FeatureStats {
        pub min: f64,
        pub max: f64,
        pub mean: f64,
        pub std: f64,
    }

    /// Per-column scaling parameters fitted on training data
    #[derive(Debug, Clone)]
    pub struct ScalingParams {
        method: ScalingMethod,
        feature_stats: Vec<FeatureStats>,
    }

    impl ScalingParams {
        /// Fit per-column statistics on training data
        pub fn fit<D: Dataset>(dataset: &D, method: ScalingMethod) -> Result<Self> {
            if dataset.is_empty() {
                return Err(SVMError::EmptyDataset);
            }

            let n = dataset.len();
            let dim = dataset.dim();
            let mut feature_stats = Vec::with_capacity(dim);

            for col in 0..dim {
                let mut min = f64::INFINITY;
                let mut max = f64::NEG_INFINITY;
                let mut sum = 0.0;
                for i in 0..n {
                    let value = dataset.row(i)[col];
                    min = min.min(value);
                    max = max.max(value);
                    sum += value;
                }
                let mean = sum / n as f64;

                let variance = if n > 1 {
                    (0..n)
                        .map(|i| (dataset.row(i)[col] - mean).powi(2))
                        .sum::<f64>()
                        / (n - 1) as f64
                } else {
                    0.0
                };

                feature_stats.push(FeatureStats {
                    min,
                    max,
                    mean,
                    std: variance.sqrt(),
                });
            }

            Ok(Self {
                method,
                feature_stats,
            })
        }

        /// Number of feature columns the parameters were fitted on
        pub fn dim(&self) -> usize {
            self.feature_stats.len()
        }

        /// Transform a single feature row using the fitted parameters
        pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
            if row.len() != self.feature_stats.len() {
                return Err(SVMError::DimensionMismatch {
                    expected: self.feature_stats.len(),
                    actual: row.len(),
                });
            }
            Ok(row
                .iter()
                .zip(&self.feature_stats)
                .map(|(&value, stats)| self.scale_value(value, stats))
                .collect())
        }

        /// Transform a dataset using the fitted parameters
        ///
        /// The dataset must have the same dimensionality the parameters were
        /// fitted on; typically fit on the training set, then transform both
        /// the training and test sets.
        pub fn transform<D: Dataset>(&self, dataset: &D) -> Result<DenseDataset> {
            let mut rows = Vec::with_capacity(dataset.len());
            for i in 0..dataset.len() {
                rows.push(self.transform_row(dataset.row(i))?);
            }

            DenseDataset::from_rows(rows, dataset.labels().to_vec())
        }

        /// Apply the fitted rule to one value
        fn scale_value(&self, value: f64, stats: &FeatureStats) -> f64 {
            match self.method {
                ScalingMethod::MinMax { min_val, max_val } => {
                    if (stats.max - stats.min).abs() < 1e-12 {
                        // Constant feature
                        (min_val + max_val) / 2.0
                    } else {
                        let normalized = (value - stats.min) / (stats.max - stats.min);
                        min_val + normalized * (max_val - min_val)
                    }
                }
                ScalingMethod::StandardScore => {
                    if stats.std < 1e-12 {
                        // Constant feature
                        0.0
                    } else {
                        (value - stats.mean) / stats.std
                    }
                }
                ScalingMethod::UnitScale => {
                    let max_abs = stats.max.abs().max(stats.min.abs());
                    if max_abs < 1e-12 {
                        0.0
                    } else {
                        value / max_abs
                    }
                }
            }
        }
    }

    /// Fit on a dataset and transform that same dataset in one call
    pub fn fit_transform<D: Dataset>(
        dataset: &D,
        method: ScalingMethod,
    ) -> Result<(DenseDataset, ScalingParams)> {
        let params = ScalingParams::fit(dataset, method)?;
        let transformed = params.transform(dataset)?;
        Ok((transformed, params))
    }
}

/// Validation utilities for training data
pub mod validation {
    use super::*;

    /// Reject any label that is not exactly +1 or -1
    pub fn validate_binary_labels<D: Dataset>(dataset: &D) -> Result<()> {
        for &label in dataset.labels() {
            if label != 1.0 && label != -1.0 {
                return Err(SVMError::InvalidLabel(label));
            }
        }
        Ok(())
    }

    /// Count positive and negative labels and report their ratio
    pub fn check_label_balance<D: Dataset>(dataset: &D) -> (usize, usize, f64) {
        let positive_count = dataset.labels().iter().filter(|&&l| l > 0.0).count();
        let negative_count = dataset.len() - positive_count;
        let balance_ratio = if negative_count == 0 {
            f64::INFINITY
        } else {
            positive_count as f64 / negative_count as f64
        };
        (positive_count, negative_count, balance_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::scaling::*;
    use super::validation::*;
    use super::*;
    use approx::assert_relative_eq;

    fn dataset() -> DenseDataset {
        DenseDataset::from_rows(
            vec![vec![0.0, 10.0], vec![2.0, 20.0], vec![4.0, 30.0]],
            vec![1.0, -1.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_minmax_scaling() {
        let data = dataset();
        let (scaled, params) = fit_transform(
            &data,
            ScalingMethod::MinMax {
                min_val: -1.0,
                max_val: 1.0,
            },
        )
        .unwrap();

        assert_eq!(params.dim(), 2);
        assert_eq!(scaled.row(0), &[-1.0, -1.0]);
        assert_eq!(scaled.row(1), &[0.0, 0.0]);
        assert_eq!(scaled.row(2), &[1.0, 1.0]);
        assert_eq!(scaled.labels(), data.labels());
    }

    #[test]
    fn test_standard_score_scaling() {
        let data = dataset();
        let (scaled, _) = fit_transform(&data, ScalingMethod::StandardScore).unwrap();

        // Column 0: mean 2, sample std 2
        assert_relative_eq!(scaled.row(0)[0], -1.0);
        assert_relative_eq!(scaled.row(1)[0], 0.0);
        assert_relative_eq!(scaled.row(2)[0], 1.0);
    }

    #[test]
    fn test_unit_scaling() {
        let data = dataset();
        let (scaled, _) = fit_transform(&data, ScalingMethod::UnitScale).unwrap();

        assert_relative_eq!(scaled.row(2)[0], 1.0);
        assert_relative_eq!(scaled.row(0)[1], 10.0 / 30.0);
    }

    #[test]
    fn test_constant_feature_handling() {
        let data = DenseDataset::from_rows(
            vec![vec![5.0, 1.0], vec![5.0, 2.0]],
            vec![1.0, -1.0],
        )
        .unwrap();

        let (minmax, _) = fit_transform(
            &data,
            ScalingMethod::MinMax {
                min_val: -1.0,
                max_val: 1.0,
            },
        )
        .unwrap();
        assert_eq!(minmax.row(0)[0], 0.0); // midpoint of the target range

        let (standard, _) = fit_transform(&data, ScalingMethod::StandardScore).unwrap();
        assert_eq!(standard.row(0)[0], 0.0);
    }

    #[test]
    fn test_fit_on_train_transform_test() {
        let train = dataset();
        let params = ScalingParams::fit(&train, ScalingMethod::UnitScale).unwrap();

        let test =
            DenseDataset::from_rows(vec![vec![8.0, 60.0]], vec![1.0]).unwrap();
        let scaled = params.transform(&test).unwrap();

        // Test values scale by the training maxima, even past 1.0
        assert_relative_eq!(scaled.row(0)[0], 2.0);
        assert_relative_eq!(scaled.row(0)[1], 2.0);
    }

    #[test]
    fn test_transform_dimension_mismatch() {
        let params = ScalingParams::fit(&dataset(), ScalingMethod::UnitScale).unwrap();
        let wrong = DenseDataset::from_rows(vec![vec![1.0]], vec![1.0]).unwrap();
        assert!(params.transform(&wrong).is_err());
    }

    #[test]
    fn test_validate_binary_labels() {
        assert!(validate_binary_labels(&dataset()).is_ok());
        // DenseDataset construction already rejects other labels, so the
        // validator is exercised through the trait
    }

    #[test]
    fn test_check_label_balance() {
        let (pos, neg, ratio) = check_label_balance(&dataset());
        assert_eq!(pos, 2);
        assert_eq!(neg, 1);
        assert_relative_eq!(ratio, 2.0);
    }
}
