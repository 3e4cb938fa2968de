//! Model-ready table preparation
//!
//! Chooses the feature columns and drops incomplete rows. This is the contract
//! the trainer relies on: every row of a labelled [`PreparedTable`] is complete.

use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use crate::error::Result;
use crate::filter::{BatchFilter, CompleteCasesFilter};
use crate::schema::ColumnConfig;
use crate::utils::{count_valid, project_columns};

/// Output of the model-ready filter
#[derive(Debug, Clone)]
pub struct PreparedTable {
    /// The filtered table; unfiltered and unprojected when there is no label
    pub table: RecordBatch,
    /// Feature columns in canonical order
    pub features: Vec<String>,
    /// Label column, `None` when no label could be derived
    pub label: Option<String>,
}

impl PreparedTable {
    /// Whether a label column exists
    #[must_use]
    pub const fn has_label(&self) -> bool {
        self.label.is_some()
    }

    /// Number of rows available for training and evaluation
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.table.num_rows()
    }
}

/// Build the feature list for a normalized table
///
/// The derived age is included only when it has at least one value; binary
/// columns follow in canonical order when present.
#[must_use]
pub fn select_features(batch: &RecordBatch, columns: &ColumnConfig) -> Vec<String> {
    let mut features = Vec::new();

    let age_has_values = batch
        .column_by_name(&columns.derived_age_column)
        .is_some_and(|age| count_valid(age.as_ref()) > 0);
    if age_has_values {
        features.push(columns.derived_age_column.clone());
    }

    features.extend(
        columns
            .binary_columns
            .iter()
            .filter(|name| batch.column_by_name(name).is_some())
            .cloned(),
    );

    features
}

/// Prepare a normalized, derived table for training
///
/// Without a label column the table is returned untouched together with the
/// feature list. Otherwise the table is projected to `features ∪ {label}` and
/// every row with a missing value in those columns is dropped.
pub fn prepare_model_table(
    batch: &RecordBatch,
    columns: &ColumnConfig,
    verbose: bool,
) -> Result<PreparedTable> {
    let features = select_features(batch, columns);

    if !features.contains(&columns.derived_age_column) && verbose {
        log::info!(
            "Column '{}' has no valid values and is not used as a feature",
            columns.derived_age_column
        );
    }
    if verbose {
        log::info!("Features used: [{}]", features.iter().join(", "));
    }

    if batch.column_by_name(&columns.target_column).is_none() {
        if verbose {
            log::warn!("Column '{}' not found", columns.target_column);
        }
        return Ok(PreparedTable {
            table: batch.clone(),
            features,
            label: None,
        });
    }

    let mut required = features.clone();
    required.push(columns.target_column.clone());

    let projected = project_columns(batch, &required)?;
    let table = CompleteCasesFilter::new(required).filter(&projected)?;

    log::debug!(
        "Model-ready table keeps {} of {} rows",
        table.num_rows(),
        batch.num_rows()
    );

    Ok(PreparedTable {
        table,
        features,
        label: Some(columns.target_column.clone()),
    })
}
