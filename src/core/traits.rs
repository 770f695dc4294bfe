//! Core traits for gradient-descent SVM training

/// Dataset abstraction for row-oriented data access
///
/// The training core only ever reads a dataset; providers (in-memory,
/// CSV-loaded) implement this trait and stay immutable while a sampler
/// borrows them.
pub trait Dataset {
    /// Number of samples in the dataset
    fn len(&self) -> usize;

    /// Number of features (dimensionality)
    fn dim(&self) -> usize;

    /// Get a single feature row by index
    ///
    /// # Panics
    /// Panics if index >= len()
    fn row(&self, i: usize) -> &[f64];

    /// Get the label for a single row
    ///
    /// # Panics
    /// Panics if index >= len()
    fn label(&self, i: usize) -> f64;

    /// All labels, in dataset order
    fn labels(&self) -> &[f64];

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
