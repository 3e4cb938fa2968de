//! Utility functions for error handling
//!
//! Path-aware wrappers around the file system calls the pipeline makes.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{PipelineError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(PipelineError::io_error("File not found")
            .with_path(path)
            .context(format!("Needed for {purpose}")));
    }

    if !path.is_file() {
        return Err(PipelineError::io_error("Path is not a file")
            .with_path(path)
            .context(format!("Expected a file for {purpose}")));
    }

    match fs::File::open(path) {
        Ok(file) => Ok(file),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::PermissionDenied => {
                    "Permission denied - check file permissions".to_string()
                }
                io::ErrorKind::NotFound => {
                    "File not found - it may have been deleted during operation".to_string()
                }
                _ => format!("Failed to open file for {purpose}"),
            };

            Err(PipelineError::io_error_with_source(context, e).with_path(path))
        }
    }
}

/// Create a file for writing, creating missing parent directories first
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            PipelineError::io_error_with_source(
                format!("Failed to create output directory for {purpose}"),
                e,
            )
            .with_path(parent)
        })?;
    }

    fs::File::create(path).map_err(|e| {
        PipelineError::io_error_with_source(format!("Failed to create file for {purpose}"), e)
            .with_path(path)
    })
}
