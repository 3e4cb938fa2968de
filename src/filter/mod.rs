//! Row filtering for record batches

pub mod core;

pub use self::core::{BatchFilter, CompleteCasesFilter, filter_record_batch};
