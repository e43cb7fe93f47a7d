//! Utility functions for error handling
//!
//! Filesystem helpers that attach the offending path and a short purpose to
//! the error, so a failed batch run says which input it could not use.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{InsightsError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        return Err(InsightsError::IoAt {
            path: path.to_path_buf(),
            message: format!("Not a readable file (needed for: {purpose})"),
            source: None,
        });
    }

    fs::File::open(path).map_err(|e| {
        let message = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            _ => format!("Failed to open file for: {purpose}"),
        };
        InsightsError::IoAt {
            path: path.to_path_buf(),
            message,
            source: Some(e),
        }
    })
}

/// Check that a directory exists, creating it when `create` is set
pub fn ensure_directory(path: &Path, purpose: &str, create: bool) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    if path.exists() {
        return Err(InsightsError::IoAt {
            path: path.to_path_buf(),
            message: format!("Path is not a directory (expected a directory for: {purpose})"),
            source: None,
        });
    }

    if !create {
        return Err(InsightsError::IoAt {
            path: path.to_path_buf(),
            message: format!("Directory not found (needed for: {purpose})"),
            source: None,
        });
    }

    fs::create_dir_all(path).map_err(|e| InsightsError::IoAt {
        path: path.to_path_buf(),
        message: format!("Failed to create directory for: {purpose}"),
        source: Some(e),
    })
}
