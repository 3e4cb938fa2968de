//! Module for converting between different array types.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Date32Array, NullArray, StringArray};
use arrow::compute::kernels::cast;
use arrow::datatypes::{DataType, Date32Type};

use crate::error::{PipelineError, Result};
use crate::schema::adapt::compatibility::determine_adaptation_strategy;
use crate::schema::adapt::date_utils::parse_date_string;
use crate::schema::adapt::types::{AdaptationStrategy, DateFormatConfig};

/// Convert an Arrow array to match the target data type
///
/// Values that cannot be represented in the target type become null; only a
/// pair of types Arrow cannot cast between at all is an error.
pub fn convert_array(
    array: &ArrayRef,
    target_type: &DataType,
    date_config: &DateFormatConfig,
) -> Result<ArrayRef> {
    let source_type = array.data_type();

    match determine_adaptation_strategy(source_type, target_type) {
        AdaptationStrategy::Identity => Ok(Arc::clone(array)),
        AdaptationStrategy::DateParsing => convert_string_to_date32(array, date_config),
        AdaptationStrategy::DateTruncation
        | AdaptationStrategy::NumericConversion
        | AdaptationStrategy::StringConversion
        | AdaptationStrategy::AutoCast => {
            if !cast::can_cast_types(source_type, target_type) {
                return Err(PipelineError::conversion(
                    format!("{source_type}"),
                    format!("cannot convert from {source_type:?} to {target_type:?}"),
                ));
            }
            Ok(cast::cast(array, target_type)?)
        }
    }
}

/// Create a null array of the specified type and length
pub fn create_null_array(data_type: &DataType, length: usize) -> Result<ArrayRef> {
    let null_array: ArrayRef = Arc::new(NullArray::new(length));
    cast::cast(&null_array, data_type).map_err(|e| {
        PipelineError::conversion(
            format!("{data_type}"),
            format!("failed to create null array: {e}"),
        )
    })
}

/// Convert a string array (of any string layout) to a Date32 array
fn convert_string_to_date32(array: &ArrayRef, date_config: &DateFormatConfig) -> Result<ArrayRef> {
    let utf8 = cast::cast(array, &DataType::Utf8)?;
    let string_array = utf8
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| PipelineError::conversion("<dates>", "expected a string array"))?;

    let dates: Date32Array = string_array
        .iter()
        .map(|value| {
            value
                .and_then(|s| parse_date_string(s, date_config))
                .map(Date32Type::from_naive_date)
        })
        .collect();

    Ok(Arc::new(dates) as ArrayRef)
}
