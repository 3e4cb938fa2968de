//! A Rust library for turning SIVEP-Gripe hospitalization records into a
//! decision-tree classifier of COVID-19 cases, with Arrow-based preprocessing.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{PipelineConfig, ReaderConfig};
pub use error::{PipelineError, Result};
pub use loader::{LoadOutcome, empty_table, load_records, try_load_records};
pub use pipeline::{PipelineReport, run};
pub use schema::ColumnConfig;

// Arrow types
pub use arrow::record_batch::RecordBatch;

// Preprocessing
pub use algorithm::surveillance::{
    PreparedTable, derive_features, normalize_records, prepare_model_table,
};

// Model backend
pub use model::{
    Classifier, EvaluationReport, FittedTree, TrainedModel, TrainingParams, TreeLayout,
    TreeStructure, TreeTrainer, evaluate,
};
pub use render::{ImageFormat, render_tree, tree_to_dot};
