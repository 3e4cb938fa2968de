//! Field normalization for raw surveillance tables
//!
//! Restricts a raw table to the allow-listed columns, parses date columns and
//! recodes binary questionnaire answers. Missing columns are skipped, never
//! fabricated.

use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, Field};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use crate::algorithm::surveillance::recode::recode_response_array;
use crate::error::{PipelineError, Result};
use crate::schema::ColumnConfig;
use crate::schema::adapt::{DateFormatConfig, convert_array};
use crate::utils::build_batch;

/// Normalize a raw record table
///
/// Output columns are the allow-listed columns present in `batch`, in
/// allow-list order. Date columns become `Date32` (unparseable values are
/// null) and binary columns become `Int64` holding only 0, 1 or null.
pub fn normalize_records(
    batch: &RecordBatch,
    columns: &ColumnConfig,
    date_config: &DateFormatConfig,
    verbose: bool,
) -> Result<RecordBatch> {
    let schema = batch.schema();

    let (present, missing): (Vec<&String>, Vec<&String>) = columns
        .selected_columns
        .iter()
        .partition(|name| schema.index_of(name).is_ok());

    trace(
        verbose,
        &format!("Selected columns available: [{}]", present.iter().join(", ")),
    );
    if !missing.is_empty() {
        trace(
            verbose,
            &format!("Selected columns not found: [{}]", missing.iter().join(", ")),
        );
    }

    let mut fields = Vec::with_capacity(present.len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(present.len());

    for name in present {
        let Some(column) = batch.column_by_name(name) else {
            continue;
        };

        let converted = if columns.is_date_column(name) {
            convert_array(column, &DataType::Date32, date_config)
        } else if columns.is_binary_column(name) {
            recode_response_array(column)
        } else {
            Ok(Arc::clone(column))
        };
        let normalized =
            converted.map_err(|e| PipelineError::conversion(name.as_str(), e.to_string()))?;

        fields.push(Field::new(name.as_str(), normalized.data_type().clone(), true));
        arrays.push(normalized);
    }

    build_batch(fields, arrays, batch.num_rows())
}

fn trace(verbose: bool, message: &str) {
    if verbose {
        log::info!("{message}");
    } else {
        log::debug!("{message}");
    }
}
