//! Core types for column type adaptation.

/// Available strategies for type adaptation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdaptationStrategy {
    /// Types already match
    Identity,
    /// Automatically cast using Arrow's cast functionality
    AutoCast,
    /// Parse date strings into date types
    DateParsing,
    /// Truncate timestamps or wide dates to calendar dates
    DateTruncation,
    /// Convert to string representation
    StringConversion,
    /// Convert numeric types
    NumericConversion,
}

/// Configuration for date format handling
#[derive(Debug, Clone)]
pub struct DateFormatConfig {
    /// List of date format strings to try when parsing dates, in priority order
    pub date_formats: Vec<String>,
    /// Enable heuristic format detection
    pub enable_format_detection: bool,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            date_formats: vec![
                "%d/%m/%Y".to_string(), // SIVEP-Gripe exports: 15/01/2023
                "%Y-%m-%d".to_string(), // ISO format: 2023-01-15
                "%Y/%m/%d".to_string(), // 2023/01/15
                "%d-%m-%Y".to_string(), // 15-01-2023
                "%d.%m.%Y".to_string(), // 15.01.2023
                "%Y%m%d".to_string(),   // Compact: 20230115
            ],
            enable_format_detection: true,
        }
    }
}
