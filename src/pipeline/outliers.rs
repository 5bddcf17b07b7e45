//! Outlier removal: blood-pressure consistency and percentile trimming

use anyhow::Result;
use log::debug;
use polars::prelude::*;
use serde::Serialize;

use super::error::PipelineError;
use super::loader::require_numeric_column;

/// Lower percentile kept by the trimming band.
pub const LOWER_PERCENTILE: f64 = 0.025;

/// Upper percentile kept by the trimming band.
pub const UPPER_PERCENTILE: f64 = 0.975;

/// Columns trimmed to their percentile band.
pub const TRIMMED_COLUMNS: [&str; 2] = ["height", "weight"];

/// Inclusive value band of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentileBounds {
    pub lower: f64,
    pub upper: f64,
}

impl PercentileBounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Result of outlier filtering
#[derive(Debug, Clone)]
pub struct FilteredTable {
    /// Surviving rows, all columns unchanged
    pub frame: DataFrame,
    /// Bounds per trimmed column, computed on the unfiltered table
    pub bounds: Vec<(String, PercentileBounds)>,
    /// Row count before filtering
    pub rows_before: usize,
}

impl FilteredTable {
    pub fn rows_removed(&self) -> usize {
        self.rows_before - self.frame.height()
    }

    pub fn bounds_for(&self, column: &str) -> Option<PercentileBounds> {
        self.bounds
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, b)| *b)
    }
}

/// Compute the `lower` and `upper` quantiles of a column with linear interpolation.
///
/// Nulls are ignored. Fails if the column has no non-null values.
pub fn percentile_bounds(
    df: &DataFrame,
    column: &str,
    lower: f64,
    upper: f64,
) -> Result<PercentileBounds> {
    let values = require_numeric_column(df, column)?.cast(&DataType::Float64)?;
    let ca = values.f64()?;

    let empty = || PipelineError::EmptyColumn {
        column: column.to_string(),
    };
    let lower = ca.quantile(lower, QuantileMethod::Linear)?.ok_or_else(empty)?;
    let upper = ca.quantile(upper, QuantileMethod::Linear)?.ok_or_else(empty)?;

    Ok(PercentileBounds { lower, upper })
}

/// Drop rows with `ap_lo > ap_hi` or with height/weight outside their
/// 2.5th-97.5th percentile band.
///
/// All bounds come from the full table before any row is removed. Rows with
/// a null in any of the involved columns do not survive.
pub fn filter_outliers(df: &DataFrame) -> Result<FilteredTable> {
    require_numeric_column(df, "ap_lo")?;
    require_numeric_column(df, "ap_hi")?;

    let bounds: Vec<(String, PercentileBounds)> = TRIMMED_COLUMNS
        .iter()
        .map(|name| {
            percentile_bounds(df, name, LOWER_PERCENTILE, UPPER_PERCENTILE)
                .map(|b| (name.to_string(), b))
        })
        .collect::<Result<_>>()?;

    let predicate = bounds.iter().fold(
        col("ap_lo").lt_eq(col("ap_hi")),
        |acc, (name, b)| {
            acc.and(col(name.as_str()).gt_eq(lit(b.lower)))
                .and(col(name.as_str()).lt_eq(lit(b.upper)))
        },
    );

    let rows_before = df.height();
    let frame = df.clone().lazy().filter(predicate).collect()?;

    for (name, b) in &bounds {
        debug!("{} band: [{:.3}, {:.3}]", name, b.lower, b.upper);
    }
    debug!(
        "outlier filter kept {} of {} rows",
        frame.height(),
        rows_before
    );

    Ok(FilteredTable {
        frame,
        bounds,
        rows_before,
    })
}
