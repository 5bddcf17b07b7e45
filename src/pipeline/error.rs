//! Error types for the medical data pipeline.
//!
//! Every variant is fatal: pipeline functions return `anyhow::Result` and
//! raise these so callers (and tests) can still downcast to the exact cause.

use thiserror::Error;

/// Errors raised while validating, transforming or analysing the table.
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    /// A column the pipeline depends on is not present in the table.
    #[error("Required column '{column}' not found in dataset")]
    MissingColumn {
        /// Name of the absent column
        column: String,
    },

    /// A column the pipeline depends on does not hold numeric values.
    #[error("Column '{column}' must be numeric, found {dtype}")]
    NonNumericColumn {
        /// Name of the offending column
        column: String,
        /// Data type reported by the loader
        dtype: String,
    },

    /// A categorical column contains null entries and cannot be counted.
    #[error("Column '{column}' contains null values")]
    NullValue { column: String },

    /// A percentile was requested over a column with no values.
    #[error("Cannot compute percentiles of empty column '{column}'")]
    EmptyColumn { column: String },

    /// Too few rows survived filtering for a correlation to be defined.
    #[error("Correlation requires at least 2 rows, got {rows}")]
    DegenerateTable { rows: usize },
}
