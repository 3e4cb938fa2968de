//! Fitted decision tree artifact

use std::io::BufWriter;
use std::path::Path;

use linfa::prelude::Predict;
use linfa_trees::{DecisionTree, TreeNode};
use ndarray::Array1;

use crate::error::Result;
use crate::error::util::safe_create_file;
use crate::model::{Classifier, Samples, TreeStructure};

/// Owned view of a tree's decision structure
#[derive(Debug, Clone, PartialEq)]
pub enum TreeLayout {
    /// Internal node; samples with `feature < threshold` go to the first child
    Split {
        feature: usize,
        threshold: f64,
        impurity_decrease: f64,
        children: Vec<TreeLayout>,
    },
    /// Terminal node predicting `class`
    Leaf { class: usize },
}

impl TreeLayout {
    /// Number of terminal nodes
    #[must_use]
    pub fn num_leaves(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Split { children, .. } => children.iter().map(Self::num_leaves).sum(),
        }
    }
}

/// A decision tree fitted on named features
///
/// Created once by the trainer and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct FittedTree {
    tree: DecisionTree<f64, usize>,
    feature_names: Vec<String>,
}

impl FittedTree {
    pub(crate) fn new(tree: DecisionTree<f64, usize>, feature_names: Vec<String>) -> Self {
        Self {
            tree,
            feature_names,
        }
    }

    /// Names of the features the tree was fitted on, in column order
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Number of terminal leaves
    #[must_use]
    pub fn num_leaves(&self) -> usize {
        self.tree.num_leaves()
    }

    /// Depth of the deepest node
    #[must_use]
    pub fn depth(&self) -> usize {
        self.tree.max_depth()
    }

    /// Feature importances paired with their names
    #[must_use]
    pub fn feature_importance(&self) -> Vec<(String, f64)> {
        self.feature_names
            .iter()
            .cloned()
            .zip(self.tree.feature_importance())
            .collect()
    }

    /// Persist the fitted tree as JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = safe_create_file(path, "saving the fitted tree")?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.tree)?;
        log::info!("Model saved to {}", path.display());
        Ok(())
    }
}

impl Classifier for FittedTree {
    fn predict(&self, data: &Samples) -> Array1<usize> {
        self.tree.predict(data)
    }
}

impl TreeStructure for FittedTree {
    fn layout(&self) -> TreeLayout {
        layout_node(self.tree.root_node())
    }
}

fn layout_node(node: &TreeNode<f64, usize>) -> TreeLayout {
    if let Some(class) = node.prediction() {
        return TreeLayout::Leaf { class };
    }

    let (feature, threshold, impurity_decrease) = node.split();
    let children = node
        .children()
        .into_iter()
        .filter_map(|child| child.as_deref())
        .map(layout_node)
        .collect();

    TreeLayout::Split {
        feature,
        threshold,
        impurity_decrease,
        children,
    }
}
