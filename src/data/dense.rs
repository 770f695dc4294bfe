//! Dense in-memory dataset
//!
//! Rows live in a single row-major buffer with stride equal to the feature
//! count, so every row is guaranteed the same width by construction.

use crate::core::{Dataset, Result, SVMError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Immutable dense dataset: feature rows paired 1:1 with {+1, -1} labels
#[derive(Debug, Clone, PartialEq)]
pub struct DenseDataset {
    data: Vec<f64>,
    labels: Vec<f64>,
    dim: usize,
}

impl DenseDataset {
    /// Build a dataset from owned rows and labels
    ///
    /// Validates that rows and labels have equal length, that every row has
    /// the same width, and that every label is +1 or -1.
    pub fn from_rows(rows: Vec<Vec<f64>>, labels: Vec<f64>) -> Result<Self> {
        if rows.is_empty() {
            return Err(SVMError::EmptyDataset);
        }
        if rows.len() != labels.len() {
            return Err(SVMError::InvalidDataset(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        for &label in &labels {
            if label != 1.0 && label != -1.0 {
                return Err(SVMError::InvalidLabel(label));
            }
        }

        let dim = rows[0].len();
        if dim == 0 {
            return Err(SVMError::InvalidDataset(
                "rows must have at least one feature".to_string(),
            ));
        }

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

    /// Return a new dataset with a constant 1.0 prepended to every row
    ///
    /// The linear model carries no explicit bias term; prepending a constant
    /// column makes the first weight act as the bias.
    pub fn with_bias_column(&self) -> Self {
        let dim = self.dim + 1;
        let mut data = Vec::with_capacity(self.len() * dim);
        for i in 0..self.len() {
            data.push(1.0);
            data.extend_from_slice(self.row(i));
        }
        Self {
            data,
            labels: self.labels.clone(),
            dim,
        }
    }

    /// Randomly split into (train, test) by row permutation
    ///
    /// `train_ratio` is the fraction of rows assigned to the training set,
    /// rounded down; both halves must end up non-empty.
    pub fn split<R: Rng>(&self, train_ratio: f64, rng: &mut R) -> Result<(Self, Self)> {
        if !(0.0 < train_ratio && train_ratio < 1.0) {
            return Err(SVMError::InvalidParameter(format!(
                "train ratio must be between 0 and 1, got {train_ratio}"
            )));
        }

        let mut permuted: Vec<usize> = (0..self.len()).collect();
        permuted.shuffle(rng);

        let train_size = (self.len() as f64 * train_ratio).floor() as usize;
        if train_size == 0 || train_size == self.len() {
            return Err(SVMError::InvalidDataset(format!(
                "split of {} rows at ratio {train_ratio} leaves an empty side",
                self.len()
            )));
        }

        let gather = |indices: &[usize]| {
            let mut data = Vec::with_capacity(indices.len() * self.dim);
            let mut labels = Vec::with_capacity(indices.len());
            for &i in indices {
                data.extend_from_slice(self.row(i));
                labels.push(self.labels[i]);
            }
            Self {
                data,
                labels,
                dim: self.dim,
            }
        };

        Ok((
            gather(&permuted[..train_size]),
            gather(&permuted[train_size..]),
        ))
    }
}

impl Dataset for DenseDataset {
    fn len(&self) -> usize {
        self.labels.len()
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn row(&self, i: usize) -> &[f64] {
        let start = i * self.dim;
        &self.data[start..start + self.dim]
    }

    fn label(&self, i: usize) -> f64 {
        self.labels[i]
    }

    fn labels(&self) -> &[f64] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_dataset() -> DenseDataset {
        DenseDataset::from_rows(
            vec![
                vec![1.0, 2.0],
                vec![3.0, 4.0],
                vec![5.0, 6.0],
                vec![7.0, 8.0],
            ],
            vec![1.0, -1.0, 1.0, -1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rows() {
        let dataset = sample_dataset();
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.dim(), 2);
        assert_eq!(dataset.row(1), &[3.0, 4.0]);
        assert_eq!(dataset.label(1), -1.0);
        assert_eq!(dataset.labels(), &[1.0, -1.0, 1.0, -1.0]);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_empty_rejected() {
        let result = DenseDataset::from_rows(Vec::new(), Vec::new());
        assert!(matches!(result, Err(SVMError::EmptyDataset)));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = DenseDataset::from_rows(vec![vec![1.0, 2.0], vec![3.0]], vec![1.0, -1.0]);
        assert!(matches!(result, Err(SVMError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_non_binary_label_rejected() {
        let result = DenseDataset::from_rows(vec![vec![1.0]], vec![0.5]);
        assert!(matches!(result, Err(SVMError::InvalidLabel(l)) if l == 0.5));
    }

    #[test]
    fn test_label_count_mismatch_rejected() {
        let result = DenseDataset::from_rows(vec![vec![1.0]], vec![1.0, -1.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_with_bias_column() {
        let dataset = sample_dataset().with_bias_column();
        assert_eq!(dataset.dim(), 3);
        assert_eq!(dataset.row(0), &[1.0, 1.0, 2.0]);
        assert_eq!(dataset.row(3), &[1.0, 7.0, 8.0]);
        assert_eq!(dataset.labels(), &[1.0, -1.0, 1.0, -1.0]);
    }

    #[test]
    fn test_split_sizes_and_pairing() {
        let dataset = sample_dataset();
        let mut rng = StdRng::seed_from_u64(7);
        let (train, test) = dataset.split(0.5, &mut rng).unwrap();

        assert_eq!(train.len(), 2);
        assert_eq!(test.len(), 2);
        assert_eq!(train.dim(), 2);

        // Every (row, label) pair in the halves must exist in the original
        for part in [&train, &test] {
            for i in 0..part.len() {
                let found = (0..dataset.len())
                    .any(|j| dataset.row(j) == part.row(i) && dataset.label(j) == part.label(i));
                assert!(found, "split row {i} not found in source dataset");
            }
        }
    }

    #[test]
    fn test_split_determinism() {
        let dataset = sample_dataset();
        let (a_train, a_test) = dataset.split(0.5, &mut StdRng::seed_from_u64(3)).unwrap();
        let (b_train, b_test) = dataset.split(0.5, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a_train, b_train);
        assert_eq!(a_test, b_test);
    }

    #[test]
    fn test_split_invalid_ratio() {
        let dataset = sample_dataset();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(dataset.split(0.0, &mut rng).is_err());
        assert!(dataset.split(1.0, &mut rng).is_err());
    }

    #[test]
    fn test_split_degenerate_size() {
        let dataset = DenseDataset::from_rows(vec![vec![1.0], vec![2.0]], vec![1.0, -1.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        // 2 rows at ratio 0.1 would leave the training side empty
        assert!(dataset.split(0.1, &mut rng).is_err());
    }
}
