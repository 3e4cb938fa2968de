//! Value recoding rules for questionnaire answers
//!
//! Scalar rules first, then their columnar counterparts working on Arrow arrays.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::DataType;

use crate::config::MISSING_VALUE_TOKENS;
use crate::error::{PipelineError, Result};
use crate::schema::adapt::{DateFormatConfig, convert_array, is_string};

/// Questionnaire code for "yes"
pub const RESPONSE_YES: f64 = 1.0;
/// Questionnaire code for "unknown"
pub const RESPONSE_UNKNOWN: f64 = 9.0;

/// Recode a questionnaire answer: missing, `NaN` and `9` become missing, `1`
/// becomes `1`, any other value becomes `0`
#[must_use]
pub fn recode_response(value: Option<f64>) -> Option<i64> {
    match value {
        None => None,
        Some(v) if v.is_nan() => None,
        Some(v) if v == RESPONSE_UNKNOWN => None,
        Some(v) if v == RESPONSE_YES => Some(1),
        Some(_) => Some(0),
    }
}

/// Recode a textual questionnaire answer
///
/// Numeric text follows [`recode_response`] and missing-value tokens such as
/// `NA` are missing; any other non-empty text is a present answer that is neither yes nor unknown and becomes `0`.
#[must_use]
pub fn recode_response_text(value: Option<&str>) -> Option<i64> {
    let text = value?.trim();
    if text.is_empty() || MISSING_VALUE_TOKENS.contains(&text) {
        return None;
    }
    match text.parse::<f64>() {
        Ok(v) => recode_response(Some(v)),
        Err(_) => Some(0),
    }
}

/// Map the outcome code to the binary label: exactly `positive_code` is `1`,
/// everything else, missing included, is `0`
#[must_use]
pub fn outcome_label(value: Option<f64>, positive_code: f64) -> i64 {
    match value {
        Some(v) if v == positive_code => 1,
        _ => 0,
    }
}

/// Map a sex category: `M`→0, `F`→1, anything else is missing
#[must_use]
pub fn recode_sex(value: Option<&str>) -> Option<i64> {
    match value {
        Some("M") => Some(0),
        Some("F") => Some(1),
        _ => None,
    }
}

/// Apply [`recode_response`] (or its textual form) to a whole column
pub fn recode_response_array(array: &ArrayRef) -> Result<ArrayRef> {
    let recoded: Int64Array = if is_string(array.data_type()) {
        let strings = downcast_strings(array)?;
        strings.iter().map(recode_response_text).collect()
    } else {
        let numbers = to_f64(array)?;
        numbers.iter().map(recode_response).collect()
    };
    Ok(Arc::new(recoded))
}

/// Apply [`outcome_label`] to a whole column; the result never holds nulls
pub fn outcome_label_array(array: &ArrayRef, positive_code: f64) -> Result<ArrayRef> {
    let labels: Int64Array = if is_string(array.data_type()) {
        let strings = downcast_strings(array)?;
        strings
            .iter()
            .map(|v| Some(outcome_label(v.and_then(|s| s.trim().parse().ok()), positive_code)))
            .collect()
    } else {
        let numbers = to_f64(array)?;
        numbers
            .iter()
            .map(|v| Some(outcome_label(v, positive_code)))
            .collect()
    };
    Ok(Arc::new(labels))
}

/// Apply [`recode_sex`] to a whole column
pub fn recode_sex_array(array: &ArrayRef) -> Result<ArrayRef> {
    let strings = downcast_strings(array)?;
    let recoded: Int64Array = strings.iter().map(recode_sex).collect();
    Ok(Arc::new(recoded))
}

fn to_f64(array: &ArrayRef) -> Result<Float64Array> {
    let converted = convert_array(array, &DataType::Float64, &DateFormatConfig::default())?;
    converted
        .as_any()
        .downcast_ref::<Float64Array>()
        .cloned()
        .ok_or_else(|| PipelineError::conversion(array.data_type().to_string(), "expected numbers"))
}

fn downcast_strings(array: &ArrayRef) -> Result<StringArray> {
    let converted = convert_array(array, &DataType::Utf8, &DateFormatConfig::default())?;
    converted
        .as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .ok_or_else(|| PipelineError::conversion(array.data_type().to_string(), "expected text"))
}
