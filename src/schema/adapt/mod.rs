//! Module for adapting column data types to what the pipeline stages expect.

pub mod types;
pub mod compatibility;
pub mod date_utils;
pub mod conversions;

// Re-export the main types and functions for easier access
pub use types::{AdaptationStrategy, DateFormatConfig};
pub use compatibility::{determine_adaptation_strategy, is_numeric, is_string, is_temporal};
pub use conversions::{convert_array, create_null_array};
pub use date_utils::{detect_date_format, parse_date_string};
