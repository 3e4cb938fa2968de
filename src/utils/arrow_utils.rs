//! Arrow utility functions for column access and batch assembly
//!
//! Builds upon the type conversion functionality in the schema/adapt/conversions module.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use arrow::util::pretty::pretty_format_batches;
use itertools::Itertools;

use crate::error::{PipelineError, Result};
use crate::schema::adapt::{DateFormatConfig, convert_array};

/// Get a column converted to `Float64`, or `None` if the batch lacks it
pub fn column_as_f64(batch: &RecordBatch, name: &str) -> Result<Option<Float64Array>> {
    let Some(column) = batch.column_by_name(name) else {
        return Ok(None);
    };

    let converted = convert_array(column, &DataType::Float64, &DateFormatConfig::default())
        .map_err(|e| PipelineError::conversion(name, e.to_string()))?;

    converted
        .as_any()
        .downcast_ref::<Float64Array>()
        .cloned()
        .map(Some)
        .ok_or_else(|| PipelineError::conversion(name, "expected a Float64 array"))
}

/// Number of non-null values in a column
#[must_use]
pub fn count_valid(array: &dyn Array) -> usize {
    array.len() - array.null_count()
}

/// Assemble a record batch, keeping `num_rows` even when there are no columns
pub fn build_batch(fields: Vec<Field>, columns: Vec<ArrayRef>, num_rows: usize) -> Result<RecordBatch> {
    let schema: SchemaRef = Arc::new(Schema::new(fields));
    let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
    Ok(RecordBatch::try_new_with_options(schema, columns, &options)?)
}

/// Return a batch where `name` holds `array`, replacing an existing column in
/// place or appending a new one at the end
pub fn upsert_column(batch: &RecordBatch, name: &str, array: ArrayRef) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();
    let field = Field::new(name, array.data_type().clone(), true);

    match schema.index_of(name) {
        Ok(idx) => {
            fields[idx] = field;
            columns[idx] = array;
        }
        Err(_) => {
            fields.push(field);
            columns.push(array);
        }
    }

    build_batch(fields, columns, batch.num_rows())
}

/// Project a batch onto the named columns, in the given order
pub fn project_columns(batch: &RecordBatch, names: &[String]) -> Result<RecordBatch> {
    let schema = batch.schema();
    let indices = names
        .iter()
        .map(|name| {
            schema
                .index_of(name)
                .map_err(|e| PipelineError::conversion(name.as_str(), e.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let fields = indices.iter().map(|&i| schema.field(i).clone()).collect();
    let columns = indices.iter().map(|&i| Arc::clone(batch.column(i))).collect();
    build_batch(fields, columns, batch.num_rows())
}

/// One line per column: name, type and non-null count
#[must_use]
pub fn summarize_batch(batch: &RecordBatch) -> String {
    let schema = batch.schema();
    let header = format!(
        "{} rows x {} columns",
        batch.num_rows(),
        batch.num_columns()
    );
    let lines = schema
        .fields()
        .iter()
        .zip(batch.columns())
        .enumerate()
        .map(|(i, (field, column))| {
            format!(
                "{i:>3}  {:<12} {:>8} non-null  {}",
                field.name(),
                count_valid(column.as_ref()),
                field.data_type()
            )
        })
        .join("\n");

    if lines.is_empty() {
        header
    } else {
        format!("{header}\n{lines}")
    }
}

/// Pretty-print the first `rows` rows of a batch
pub fn preview_batch(batch: &RecordBatch, rows: usize) -> Result<String> {
    if batch.num_columns() == 0 {
        return Ok(String::from("(no columns)"));
    }
    let head = batch.slice(0, rows.min(batch.num_rows()));
    Ok(pretty_format_batches(&[head])?.to_string())
}
