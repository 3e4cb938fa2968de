//! Decision-tree model backend
//!
//! The preprocessing code never touches `linfa` types directly: it hands a
//! [`PreparedTable`](crate::algorithm::surveillance::PreparedTable) to the
//! [`TreeTrainer`] and consumes the fitted model through the [`Classifier`] and
//! [`TreeStructure`] traits.

pub mod dataset;
pub mod evaluation;
pub mod trainer;
pub mod tree;

use linfa::Dataset;
use ndarray::{Array1, Ix1};

pub use dataset::dataset_from_batch;
pub use evaluation::{ClassMetrics, EvaluationReport, evaluate};
pub use trainer::{TrainedModel, TrainingParams, TreeTrainer};
pub use tree::{FittedTree, TreeLayout};

/// Feature matrix with one class label per row
pub type Samples = Dataset<f64, usize, Ix1>;

/// Something that assigns a class to every sample of a dataset
pub trait Classifier {
    /// Predict one class per row of `data`
    fn predict(&self, data: &Samples) -> Array1<usize>;
}

/// A fitted model whose decision structure can be exported
pub trait TreeStructure {
    /// Owned description of the decision structure, root first
    fn layout(&self) -> TreeLayout;
}
