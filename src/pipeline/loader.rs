//! Dataset loader for medical examination CSV files

use anyhow::{Context, Result};
use log::debug;
use polars::prelude::*;
use std::path::Path;

use super::error::PipelineError;
use crate::utils::{create_spinner, finish_with_success};

/// Columns every examination dataset must provide, in file order.
pub const EXPECTED_COLUMNS: [&str; 13] = [
    "id",
    "age",
    "gender",
    "height",
    "weight",
    "ap_hi",
    "ap_lo",
    "cholesterol",
    "gluc",
    "smoke",
    "alco",
    "active",
    "cardio",
];

/// Lazily scan a comma-separated dataset.
///
/// `infer_schema_length` of 0 scans the whole file for type inference.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<LazyFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension != "csv" {
        anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv",
            extension
        );
    }

    let infer = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(infer)
        .finish()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))
}

/// Load and validate a dataset, showing a spinner while it is read
/// when `show_progress` is set.
///
/// Returns the collected table with its row count, column count and
/// estimated memory footprint in megabytes.
pub fn load_dataset_with_progress(
    path: &Path,
    infer_schema_length: usize,
    show_progress: bool,
) -> Result<(DataFrame, usize, usize, f64)> {
    let spinner = create_spinner(&format!("Reading {}...", path.display()), show_progress);

    let df = load_dataset(path, infer_schema_length)?
        .collect()
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;
    validate_schema(&df)?;

    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    finish_with_success(&spinner, &format!("Loaded {} rows", rows));
    debug!("loaded {} rows x {} columns ({:.2} MB)", rows, cols, memory_mb);

    Ok((df, rows, cols, memory_mb))
}

/// Check that all expected columns exist and hold numeric values.
pub fn validate_schema(df: &DataFrame) -> Result<()> {
    for name in EXPECTED_COLUMNS {
        require_numeric_column(df, name)?;
    }
    Ok(())
}

/// Look up a column, failing unless it exists and is primitive numeric.
pub fn require_numeric_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    let column = df.column(name).map_err(|_| PipelineError::MissingColumn {
        column: name.to_string(),
    })?;

    if !column.dtype().is_primitive_numeric() {
        return Err(PipelineError::NonNumericColumn {
            column: name.to_string(),
            dtype: column.dtype().to_string(),
        }
        .into());
    }

    Ok(column)
}
