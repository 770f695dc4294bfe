//! Rust implementation of a linear Support Vector Machine trained by
//! mini-batch (sub-)gradient descent with momentum

pub mod api;
pub mod core;
pub mod data;
pub mod model;
pub mod optimizer;
pub mod sampler;
pub mod trainer;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::{EvaluationMetrics, ModelInfo, TrainedModel, SVM};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::data::DenseDataset;
pub use crate::model::LinearSvm;
pub use crate::optimizer::GdOptimizer;
pub use crate::sampler::BatchSampler;
pub use crate::trainer::{quadratic_trace, GdTrainer};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
