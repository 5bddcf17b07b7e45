//! Analysis export to JSON

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{CategoryCount, CorrelationMatrix, FilteredTable, PercentileBounds};

/// Metadata about the run
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// Medviz version
    pub medviz_version: String,
    /// Input file path
    pub input_file: String,
    /// Rows before outlier filtering
    pub rows_loaded: usize,
    /// Rows surviving outlier filtering
    pub rows_filtered: usize,
}

/// Trimming band of one column
#[derive(Serialize)]
pub struct BoundsEntry {
    pub column: String,
    #[serde(flatten)]
    pub bounds: PercentileBounds,
}

/// Correlation matrix in row-major form. Undefined entries are `null`.
#[derive(Serialize)]
pub struct CorrelationExport {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl From<&CorrelationMatrix> for CorrelationExport {
    fn from(corr: &CorrelationMatrix) -> Self {
        Self {
            columns: corr.columns().to_vec(),
            values: corr.rows(),
        }
    }
}

/// Complete export of the categorical counts and the correlation analysis
#[derive(Serialize)]
pub struct AnalysisExport {
    pub metadata: ExportMetadata,
    pub category_counts: Vec<CategoryCount>,
    pub outlier_bounds: Vec<BoundsEntry>,
    pub correlation: CorrelationExport,
}

impl AnalysisExport {
    pub fn new(
        input_file: &str,
        counts: &[CategoryCount],
        filtered: &FilteredTable,
        corr: &CorrelationMatrix,
    ) -> Self {
        Self {
            metadata: ExportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                medviz_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input_file.to_string(),
                rows_loaded: filtered.rows_before,
                rows_filtered: filtered.frame.height(),
            },
            category_counts: counts.to_vec(),
            outlier_bounds: filtered
                .bounds
                .iter()
                .map(|(column, bounds)| BoundsEntry {
                    column: column.clone(),
                    bounds: *bounds,
                })
                .collect(),
            correlation: corr.into(),
        }
    }
}

/// Write the analysis export as pretty-printed JSON.
pub fn export_analysis(export: &AnalysisExport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(export)
        .context("Failed to serialize analysis to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write analysis to {}", output_path.display()))?;

    Ok(())
}
