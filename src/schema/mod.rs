//! Column definitions and type adaptation for surveillance tables.

pub mod adapt;
pub mod columns;

// Re-export the main adaptation types and functions for easier access
pub use adapt::{AdaptationStrategy, DateFormatConfig, convert_array, create_null_array};
pub use columns::ColumnConfig;
