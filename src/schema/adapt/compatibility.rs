//! Module for classifying Arrow data types and choosing an adaptation strategy.

use arrow::datatypes::DataType;
use crate::schema::adapt::types::AdaptationStrategy;

/// Check if a data type is numeric
#[must_use]
pub const fn is_numeric(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float16
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a data type is a string type
#[must_use]
pub const fn is_string(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View)
}

/// Check if a data type is a temporal type
#[must_use]
pub const fn is_temporal(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _)
    )
}

/// Determine how a column of `source` type is brought to `target` type
#[must_use]
pub fn determine_adaptation_strategy(source: &DataType, target: &DataType) -> AdaptationStrategy {
    if source == target {
        return AdaptationStrategy::Identity;
    }

    match (source, target) {
        (s, DataType::Date32) if is_string(s) => AdaptationStrategy::DateParsing,
        (s, DataType::Date32) if is_temporal(s) => AdaptationStrategy::DateTruncation,
        (s, t) if is_numeric(s) && is_numeric(t) => AdaptationStrategy::NumericConversion,
        (_, t) if is_string(t) => AdaptationStrategy::StringConversion,
        _ => AdaptationStrategy::AutoCast,
    }
}
