//! Utility functions for working with Arrow tables

pub mod arrow_utils;

pub use arrow_utils::{
    build_batch, column_as_f64, count_valid, preview_batch, project_columns,
    summarize_batch, upsert_column,
};
