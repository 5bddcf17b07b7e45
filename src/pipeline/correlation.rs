//! Pearson correlation matrix over the numeric columns of a table

use anyhow::Result;
use faer::Mat;
use log::{debug, warn};
use polars::prelude::*;

use super::error::PipelineError;

/// Square, symmetric Pearson correlation matrix with labelled axes.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Mat<f64>,
}

impl CorrelationMatrix {
    /// Column names, identical on both axes.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[(i, j)]
    }

    /// Correlation between two named columns, if both are present.
    pub fn lookup(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.get(i, j))
    }

    /// Mask hiding the upper triangle and the diagonal (`true` = hidden).
    pub fn upper_triangle_mask(&self) -> Vec<Vec<bool>> {
        let n = self.len();
        (0..n).map(|i| (0..n).map(|j| j >= i).collect()).collect()
    }

    /// Matrix rows with NaN entries mapped to `None`.
    pub fn rows(&self) -> Vec<Vec<Option<f64>>> {
        let n = self.len();
        (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| Some(self.get(i, j)).filter(|v| !v.is_nan()))
                    .collect()
            })
            .collect()
    }
}

/// Center a null-free column and scale it to unit norm.
///
/// Returns `None` for zero-variance columns.
fn standardize(values: &Float64Chunked) -> Option<Vec<f64>> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    let mean = values.into_no_null_iter().sum::<f64>() / n as f64;

    let sum_sq_dev: f64 = values.into_no_null_iter().map(|x| (x - mean).powi(2)).sum();
    if sum_sq_dev == 0.0 {
        return None;
    }
    let norm = sum_sq_dev.sqrt();

    Some(values.into_no_null_iter().map(|x| (x - mean) / norm).collect())
}

/// Pearson correlation over the rows where both columns are non-null.
///
/// NaN when fewer than 2 complete pairs remain or either side is constant
/// over them.
fn pairwise_pearson(a: &Float64Chunked, b: &Float64Chunked) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b.iter())
        .filter_map(|(x, y)| Some((x?, y?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let (sum_x, sum_y) = pairs
        .iter()
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    let (mean_x, mean_y) = (sum_x / n, sum_y / n);

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Compute the Pearson correlation of every pair of numeric columns.
///
/// Algorithm for null-free columns:
/// 1. Center each column and scale it to unit norm: Z
/// 2. R = Z^T * Z
///
/// Any pair involving a column with nulls is computed over the rows where
/// both values are present, like pandas' `DataFrame.corr`. A zero-variance
/// column yields NaN across its whole row and column; all other diagonal
/// entries are exactly 1.0.
pub fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let n_rows = df.height();
    if n_rows < 2 {
        return Err(PipelineError::DegenerateTable { rows: n_rows }.into());
    }

    let numeric: Vec<&Column> = df
        .get_columns()
        .iter()
        .filter(|c| c.dtype().is_primitive_numeric())
        .collect();
    let n_cols = numeric.len();

    let mut columns = Vec::with_capacity(n_cols);
    let mut raw = Vec::with_capacity(n_cols);
    let mut standardized = Vec::with_capacity(n_cols);
    for column in numeric {
        let cast = column.cast(&DataType::Float64)?;
        let values = cast.f64()?.clone();
        let nulls = values.null_count();

        let z = if nulls == 0 {
            let z = standardize(&values);
            if z.is_none() {
                warn!(
                    "column '{}' has zero variance; its correlations are undefined",
                    column.name()
                );
            }
            z
        } else {
            warn!(
                "column '{}' has {} null value(s); correlating over complete pairs",
                column.name(),
                nulls
            );
            None
        };

        columns.push(column.name().to_string());
        standardized.push(z);
        raw.push((values, nulls > 0));
    }

    let mut z = Mat::<f64>::zeros(n_rows, n_cols);
    for (col_idx, values) in standardized.iter().enumerate() {
        if let Some(values) = values {
            for (row_idx, &v) in values.iter().enumerate() {
                z[(row_idx, col_idx)] = v;
            }
        }
    }
    let product = z.transpose() * &z;

    // Mirror the lower triangle so the result is exactly symmetric.
    let values = Mat::from_fn(n_cols, n_cols, |i, j| {
        let (r, c) = if i >= j { (i, j) } else { (j, i) };
        let (r_values, r_nulls) = &raw[r];
        let (c_values, c_nulls) = &raw[c];

        if *r_nulls || *c_nulls {
            let v = pairwise_pearson(r_values, c_values);
            if r == c && !v.is_nan() {
                1.0
            } else {
                v
            }
        } else if standardized[r].is_none() || standardized[c].is_none() {
            f64::NAN
        } else if r == c {
            1.0
        } else {
            product[(r, c)].clamp(-1.0, 1.0)
        }
    });

    debug!("computed {0}x{0} correlation matrix over {1} rows", n_cols, n_rows);

    Ok(CorrelationMatrix { columns, values })
}
