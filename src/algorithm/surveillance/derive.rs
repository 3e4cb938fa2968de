//! Feature and label derivation
//!
//! Appends the derived `age` and `target` columns and recodes the sex column.
//! The three derivations are independent of one another.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Date32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::Datelike;

use crate::algorithm::surveillance::recode::{outcome_label_array, recode_sex_array};
use crate::error::{PipelineError, Result};
use crate::schema::ColumnConfig;
use crate::schema::adapt::{DateFormatConfig, convert_array, create_null_array};
use crate::utils::upsert_column;

/// Derive `age`, `target` and the recoded sex column
///
/// `reference_year` is the year birth dates are subtracted from.
pub fn derive_features(
    batch: &RecordBatch,
    columns: &ColumnConfig,
    reference_year: i32,
    verbose: bool,
) -> Result<RecordBatch> {
    let age = derive_age(batch, columns, reference_year, verbose)?;
    let mut derived = upsert_column(batch, &columns.derived_age_column, age)?;

    if let Some(outcome) = batch.column_by_name(&columns.outcome_column) {
        let target = outcome_label_array(outcome, columns.positive_outcome_code)
            .map_err(|e| PipelineError::conversion(columns.outcome_column.as_str(), e.to_string()))?;
        derived = upsert_column(&derived, &columns.target_column, target)?;
    } else if verbose {
        log::warn!(
            "Column {} not found; the '{}' column will not be created",
            columns.outcome_column,
            columns.target_column
        );
    }

    if let Some(sex) = batch.column_by_name(&columns.sex_column) {
        let recoded = recode_sex_array(sex)
            .map_err(|e| PipelineError::conversion(columns.sex_column.as_str(), e.to_string()))?;
        derived = upsert_column(&derived, &columns.sex_column, recoded)?;
    }

    Ok(derived)
}

/// Compute the age column
///
/// A numeric age column is copied as is. Otherwise the age is
/// `reference_year - birth year`, without clamping, so future birth dates give
/// negative ages. With neither column the result is entirely null.
pub fn derive_age(
    batch: &RecordBatch,
    columns: &ColumnConfig,
    reference_year: i32,
    verbose: bool,
) -> Result<ArrayRef> {
    if let Some(age) = batch.column_by_name(&columns.age_column) {
        return numeric_age(age)
            .map_err(|e| PipelineError::conversion(columns.age_column.as_str(), e.to_string()));
    }

    if let Some(birth) = batch.column_by_name(&columns.birth_date_column) {
        return age_from_birth_dates(birth, reference_year).map_err(|e| {
            PipelineError::conversion(columns.birth_date_column.as_str(), e.to_string())
        });
    }

    if verbose {
        log::warn!(
            "Columns {} and {} not found; '{}' will be entirely missing",
            columns.age_column,
            columns.birth_date_column,
            columns.derived_age_column
        );
    }
    create_null_array(&DataType::Int64, batch.num_rows())
}

fn numeric_age(age: &ArrayRef) -> Result<ArrayRef> {
    let config = DateFormatConfig::default();
    let as_float = convert_array(age, &DataType::Float64, &config)?;
    convert_array(&as_float, &DataType::Int64, &config)
}

fn age_from_birth_dates(birth: &ArrayRef, reference_year: i32) -> Result<ArrayRef> {
    let dates = convert_array(birth, &DataType::Date32, &DateFormatConfig::default())?;
    let dates = dates
        .as_any()
        .downcast_ref::<Date32Array>()
        .ok_or_else(|| PipelineError::conversion("<birth dates>", "expected a Date32 array"))?;

    let ages: Int64Array = (0..dates.len())
        .map(|i| {
            if dates.is_null(i) {
                return None;
            }
            dates
                .value_as_date(i)
                .map(|d| i64::from(reference_year) - i64::from(d.year()))
        })
        .collect();

    Ok(Arc::new(ages))
}
