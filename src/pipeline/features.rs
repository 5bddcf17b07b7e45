//! Derived risk indicators: overweight flag and binarized lab levels

use anyhow::Result;
use log::debug;
use polars::prelude::*;

use super::loader::require_numeric_column;

/// BMI above which a patient is flagged as overweight.
pub const OVERWEIGHT_BMI_THRESHOLD: f64 = 25.0;

/// Highest ordinal level still considered normal (1 = normal, 2/3 = elevated).
pub const ORDINAL_NORMAL_LEVEL: i64 = 1;

/// Ordinal lab columns rewritten to 0/1 in place.
pub const ORDINAL_COLUMNS: [&str; 2] = ["cholesterol", "gluc"];

/// Body Mass Index from weight in kilograms and height in centimeters.
#[inline]
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

#[inline]
pub fn is_overweight(weight_kg: f64, height_cm: f64) -> bool {
    bmi(weight_kg, height_cm) > OVERWEIGHT_BMI_THRESHOLD
}

/// Map an ordinal lab level to 0 (normal) or 1 (elevated).
#[inline]
pub fn binarize_ordinal(value: f64) -> i32 {
    i32::from(value > ORDINAL_NORMAL_LEVEL as f64)
}

/// Add the `overweight` column and binarize `cholesterol` and `gluc`.
///
/// The ordinal columns are overwritten, so their 1-3 levels are
/// gone afterwards. `overweight` is appended after the existing columns.
/// A null input compares as false, so every derived flag is 0 or 1.
pub fn derive_features(df: DataFrame) -> Result<DataFrame> {
    for name in ["weight", "height"].iter().chain(ORDINAL_COLUMNS.iter()) {
        require_numeric_column(&df, name)?;
    }

    let height_m = col("height").cast(DataType::Float64) / lit(100.0);
    let bmi_expr = col("weight").cast(DataType::Float64) / (height_m.clone() * height_m);

    let mut exprs = vec![bmi_expr
        .gt(lit(OVERWEIGHT_BMI_THRESHOLD))
        .fill_null(lit(false))
        .cast(DataType::Int32)
        .alias("overweight")];
    exprs.extend(ORDINAL_COLUMNS.iter().map(|name| {
        col(*name)
            .gt(lit(ORDINAL_NORMAL_LEVEL))
            .fill_null(lit(false))
            .cast(DataType::Int32)
            .alias(*name)
    }));

    let derived = df.lazy().with_columns(exprs).collect()?;

    let overweight = derived.column("overweight")?.cast(&DataType::Int64)?;
    let flagged = overweight.i64()?.sum().unwrap_or(0);
    debug!(
        "derived overweight flag for {} rows ({} overweight)",
        derived.height(),
        flagged
    );

    Ok(derived)
}
