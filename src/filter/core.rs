//! Core row filtering for Arrow record batches
//!
//! Defines the filter trait used by the pipeline and the complete-case filter
//! that builds the model-ready table.

use arrow::array::{Array, ArrayRef, BooleanArray};
use arrow::compute::filter as arrow_filter;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};

use crate::error::{PipelineError, Result};

/// Filter a record batch based on a boolean mask
///
/// # Arguments
/// * `batch` - The record batch to filter
/// * `mask` - The boolean mask indicating which rows to keep
///
/// # Returns
/// A new record batch with only rows where mask is true
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return Err(PipelineError::Filter(format!(
            "Mask length ({}) doesn't match batch row count ({})",
            mask.len(),
            batch.num_rows()
        )));
    }

    let filtered_columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| arrow_filter(col, mask))
        .collect::<arrow::error::Result<_>>()?;

    let options = RecordBatchOptions::new().with_row_count(Some(mask.true_count()));
    Ok(RecordBatch::try_new_with_options(
        batch.schema(),
        filtered_columns,
        &options,
    )?)
}

/// Trait for objects that can filter record batches
pub trait BatchFilter: std::fmt::Debug {
    /// Filter a record batch
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch>;
}

/// A filter that keeps only rows without nulls in the given columns
#[derive(Debug, Clone)]
pub struct CompleteCasesFilter {
    columns: Vec<String>,
}

impl CompleteCasesFilter {
    /// Create a new complete-case filter over `columns`
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Build the keep-mask for a batch
    pub fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let arrays = self
            .columns
            .iter()
            .map(|name| {
                batch.column_by_name(name).ok_or_else(|| {
                    PipelineError::Filter(format!("Column '{name}' not found"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let keep: Vec<bool> = (0..batch.num_rows())
            .map(|row| arrays.iter().all(|array| array.is_valid(row)))
            .collect();

        Ok(BooleanArray::from(keep))
    }
}

impl BatchFilter for CompleteCasesFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let mask = self.mask(batch)?;
        filter_record_batch(batch, &mask)
    }
}
