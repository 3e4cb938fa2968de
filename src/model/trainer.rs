//! Decision tree training with a seeded train/test split

use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::algorithm::surveillance::PreparedTable;
use crate::error::{PipelineError, Result};
use crate::model::dataset::dataset_from_batch;
use crate::model::Samples;
use crate::model::tree::FittedTree;

/// Split and tree hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Fraction of rows held out for evaluation
    pub test_size: f32,
    /// Seed for the shuffle preceding the split
    pub random_state: u64,
    /// Upper bound on the number of terminal leaves
    ///
    /// Enforced as a depth limit of `floor(log2(max_leaf_nodes))`, so the
    /// default of 10 allows at most 8 leaves.
    pub max_leaf_nodes: usize,
    /// Optional explicit depth limit
    pub max_depth: Option<usize>,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            test_size: 0.3,
            random_state: 42,
            max_leaf_nodes: 10,
            max_depth: None,
        }
    }
}

impl TrainingParams {
    /// Depth limit that keeps the tree within `max_leaf_nodes` leaves
    ///
    /// A binary tree of depth `d` has at most `2^d` leaves.
    #[must_use]
    pub fn effective_max_depth(&self) -> usize {
        let leaf_depth = self.max_leaf_nodes.max(1).ilog2() as usize;
        self.max_depth.map_or(leaf_depth, |d| d.min(leaf_depth))
    }

    fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(PipelineError::Training(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        if self.max_leaf_nodes < 2 {
            return Err(PipelineError::Training(format!(
                "max_leaf_nodes must be at least 2, got {}",
                self.max_leaf_nodes
            )));
        }
        Ok(())
    }
}

/// A fitted tree together with the partitions it was built from
#[derive(Debug, Clone)]
pub struct TrainedModel {
    /// The fitted artifact
    pub model: FittedTree,
    /// Rows the tree was fitted on
    pub train: Samples,
    /// Held-out rows for evaluation
    pub test: Samples,
}

/// Fits depth-limited Gini decision trees
#[derive(Debug, Clone, Default)]
pub struct TreeTrainer {
    params: TrainingParams,
}

impl TreeTrainer {
    /// Create a trainer with the given parameters
    #[must_use]
    pub fn new(params: TrainingParams) -> Self {
        Self { params }
    }

    /// Split the prepared table and fit a tree on the training partition
    ///
    /// A table without label, without features or without rows violates the
    /// trainer's preconditions and is reported as an error.
    pub fn train(&self, prepared: &PreparedTable) -> Result<TrainedModel> {
        self.params.validate()?;

        let label = prepared.label.as_deref().ok_or_else(|| {
            PipelineError::Training("the prepared table has no label column".to_string())
        })?;
        if prepared.features.is_empty() {
            return Err(PipelineError::Training("no feature columns available".to_string()));
        }

        let dataset = dataset_from_batch(&prepared.table, &prepared.features, label)?;
        if dataset.nsamples() == 0 {
            return Err(PipelineError::Training(
                "the model-ready table is empty".to_string(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(self.params.random_state);
        let (train, test) = dataset
            .shuffle(&mut rng)
            .split_with_ratio(1.0 - self.params.test_size);
        log::info!(
            "Split {} rows into {} training and {} test rows",
            train.nsamples() + test.nsamples(),
            train.nsamples(),
            test.nsamples()
        );

        let max_depth = self.params.effective_max_depth();
        let tree = DecisionTree::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(Some(max_depth))
            .fit(&train)
            .map_err(|e| PipelineError::Training(e.to_string()))?;

        let model = FittedTree::new(tree, prepared.features.clone());
        log::info!(
            "Training finished: {} leaves, depth {} (leaf cap {})",
            model.num_leaves(),
            model.depth(),
            self.params.max_leaf_nodes
        );
        for (feature, importance) in model.feature_importance() {
            if importance > 0.0 {
                log::debug!("  importance {feature}: {importance:.4}");
            }
        }

        Ok(TrainedModel { model, train, test })
    }
}
