//! Mini-batch sampling
//!
//! Draws uniform random mini-batches without replacement from a fixed
//! dataset. The sampler keeps no memory across draws: each call re-samples
//! from the full index range, so a row can reappear in a later batch.

use crate::core::{Batch, Dataset, Result, SVMError};
use rand::seq::index;
use rand::Rng;

/// Without-replacement mini-batch sampler over a borrowed dataset
///
/// All randomness comes from the `Rng` handed to each call, so seeding that
/// source makes every draw reproducible.
pub struct BatchSampler<'a, D: Dataset> {
    dataset: &'a D,
    batch_size: usize,
}

impl<'a, D: Dataset> BatchSampler<'a, D> {
    /// Create a sampler with a default batch size
    pub fn new(dataset: &'a D, batch_size: usize) -> Result<Self> {
        if dataset.is_empty() {
            return Err(SVMError::EmptyDataset);
        }
        Self::check_batch_size(batch_size, dataset.len())?;
        Ok(Self {
            dataset,
            batch_size,
        })
    }

    /// The configured default batch size
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Draw batch indices uniformly at random without replacement
    ///
    /// If `m` is given the batch will be of size `m`, otherwise the default
    /// batch size is used. The returned order is randomized, not the dataset
    /// order.
    pub fn random_batch_indices<R: Rng>(
        &self,
        rng: &mut R,
        m: Option<usize>,
    ) -> Result<Vec<usize>> {
        let m = m.unwrap_or(self.batch_size);
        Self::check_batch_size(m, self.dataset.len())?;
        Ok(index::sample(rng, self.dataset.len(), m).into_vec())
    }

    /// Draw a random batch of rows and labels without replacement
    ///
    /// Row and label order follows the sampled index order.
    pub fn get_batch<R: Rng>(&self, rng: &mut R, m: Option<usize>) -> Result<Batch> {
        let indices = self.random_batch_indices(rng, m)?;

        let dim = self.dataset.dim();
        let mut data = Vec::with_capacity(indices.len() * dim);
        let mut labels = Vec::with_capacity(indices.len());
        for &i in &indices {
            data.extend_from_slice(self.dataset.row(i));
            labels.push(self.dataset.label(i));
        }

        Ok(Batch::from_parts(data, labels, dim))
    }

    fn check_batch_size(m: usize, available: usize) -> Result<()> {
        if m == 0 {
            return Err(SVMError::InvalidParameter(
                "batch size must be at least 1".to_string(),
            ));
        }
        if m > available {
            return Err(SVMError::BatchTooLarge {
                requested: m,
                available,
            });
        }
        Ok(())
    }
}
