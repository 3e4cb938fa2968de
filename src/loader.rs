//! Delimited record file loading

use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use regex::Regex;

use crate::config::ReaderConfig;
use crate::error::util::safe_open_file;
use crate::error::{PipelineError, Result};

/// Outcome of loading a record file
///
/// Keeps "the file could not be read" apart from "the file holds no rows".
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The file was read; the table may still have zero rows
    Loaded(RecordBatch),
    /// The file could not be read or decoded
    Failed {
        /// The path that was attempted
        path: PathBuf,
        /// Why loading failed
        reason: String,
    },
}

impl LoadOutcome {
    /// Whether loading failed
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Turn the outcome into a `Result`
    pub fn into_result(self) -> Result<RecordBatch> {
        match self {
            Self::Loaded(batch) => Ok(batch),
            Self::Failed { path, reason } => Err(PipelineError::Load { path, reason }),
        }
    }

    /// Take the loaded table, substituting an empty table on failure
    #[must_use]
    pub fn into_table(self) -> RecordBatch {
        match self {
            Self::Loaded(batch) => batch,
            Self::Failed { path, reason } => {
                log::error!(
                    "Could not load records from {}; continuing with an empty table: {reason}",
                    path.display()
                );
                empty_table()
            }
        }
    }
}

/// A table with zero rows and zero columns
#[must_use]
pub fn empty_table() -> RecordBatch {
    RecordBatch::new_empty(Arc::new(Schema::empty()))
}

/// Load a delimited record file, reporting failure as a [`LoadOutcome`]
#[must_use]
pub fn load_records(path: &Path, config: &ReaderConfig) -> LoadOutcome {
    match try_load_records(path, config) {
        Ok(batch) => {
            log::info!(
                "Loaded {} records with {} columns from {}",
                batch.num_rows(),
                batch.num_columns(),
                path.display()
            );
            LoadOutcome::Loaded(batch)
        }
        Err(e) => LoadOutcome::Failed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    }
}

/// Read a delimited record file into a single record batch
///
/// Column types are inferred from the data. Empty fields, and fields matching
/// the configured missing-value pattern, become nulls.
pub fn try_load_records(path: &Path, config: &ReaderConfig) -> Result<RecordBatch> {
    let mut file = safe_open_file(path, "loading surveillance records")?;

    let mut format = Format::default()
        .with_header(config.has_header)
        .with_delimiter(config.delimiter);
    if let Some(pattern) = &config.null_regex {
        let null_regex = Regex::new(pattern).map_err(|e| PipelineError::Load {
            path: path.to_path_buf(),
            reason: format!("invalid missing-value pattern: {e}"),
        })?;
        format = format.with_null_regex(null_regex);
    }

    let (schema, scanned) = format
        .infer_schema(&mut file, config.infer_schema_records)
        .map_err(|e| PipelineError::Load {
            path: path.to_path_buf(),
            reason: format!("schema inference failed: {e}"),
        })?;
    log::debug!(
        "Inferred {} columns from {scanned} records in {}",
        schema.fields().len(),
        path.display()
    );

    file.seek(SeekFrom::Start(0))
        .map_err(|e| PipelineError::from(e).with_path(path))?;

    let schema = Arc::new(schema);
    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_format(format)
        .with_batch_size(config.batch_size)
        .build(file)?;

    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| PipelineError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(concat_batches(&schema, &batches)?)
}
