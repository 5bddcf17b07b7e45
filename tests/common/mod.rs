//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small examination table with hand-checked characteristics
///
/// This DataFrame includes:
/// - `height`/`weight`: rows 2 and 6 fall outside the height band, rows 4
///   and 9 outside the weight band (2.5th-97.5th percentile)
/// - `ap_lo`/`ap_hi`: row 7 has diastolic above systolic
/// - BMI: rows 0, 2, 4 and 8 are overweight
/// - `cholesterol`/`gluc`: ordinal 1-3 levels
/// - `cardio`: five rows per outcome
pub fn create_medical_dataframe() -> DataFrame {
    df! {
        "id" => [0i64, 1, 2, 3, 4, 5, 6, 7, 8, 9],
        "age" => [18393i64, 20228, 18857, 17623, 17474, 21914, 22113, 22584, 17668, 19834],
        "gender" => [2i64, 1, 1, 2, 1, 1, 1, 2, 1, 1],
        "height" => [165i64, 180, 150, 170, 175, 160, 190, 168, 172, 155],
        "weight" => [70.0f64, 70.0, 80.0, 60.0, 90.0, 55.0, 85.0, 62.0, 75.0, 50.0],
        "ap_hi" => [120i64, 130, 140, 110, 150, 120, 125, 80, 135, 115],
        "ap_lo" => [80i64, 85, 90, 70, 100, 80, 85, 90, 88, 75],
        "cholesterol" => [1i64, 2, 3, 1, 1, 2, 1, 3, 1, 1],
        "gluc" => [1i64, 1, 2, 1, 3, 1, 1, 1, 2, 1],
        "smoke" => [0i64, 1, 0, 0, 1, 0, 0, 1, 0, 0],
        "alco" => [0i64, 0, 0, 1, 0, 0, 1, 0, 0, 0],
        "active" => [1i64, 1, 0, 1, 1, 0, 1, 1, 0, 1],
        "cardio" => [0i64, 1, 1, 0, 1, 0, 1, 0, 1, 0],
    }
    .unwrap()
}

/// Ids of the rows in `create_medical_dataframe` that survive outlier filtering
pub const SURVIVING_IDS: [i64; 5] = [0, 1, 3, 5, 8];

/// Expected `overweight` flags for `create_medical_dataframe`
pub const EXPECTED_OVERWEIGHT: [i64; 10] = [1, 0, 1, 0, 1, 0, 0, 0, 1, 0];

/// Create a larger examination table with random but plausible values
pub fn create_random_medical_dataframe(rows: usize, seed: u64) -> DataFrame {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let ids: Vec<i64> = (0..rows as i64).collect();
    let age: Vec<i64> = (0..rows).map(|_| rng.gen_range(10_000..25_000)).collect();
    let gender: Vec<i64> = (0..rows).map(|_| rng.gen_range(1..=2)).collect();
    let height: Vec<i64> = (0..rows).map(|_| rng.gen_range(140..200)).collect();
    let weight: Vec<f64> = (0..rows).map(|_| rng.gen_range(40.0..130.0)).collect();
    let ap_hi: Vec<i64> = (0..rows).map(|_| rng.gen_range(90..180)).collect();
    let ap_lo: Vec<i64> = (0..rows).map(|_| rng.gen_range(60..120)).collect();
    let cholesterol: Vec<i64> = (0..rows).map(|_| rng.gen_range(1..=3)).collect();
    let gluc: Vec<i64> = (0..rows).map(|_| rng.gen_range(1..=3)).collect();
    let smoke: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..=1)).collect();
    let alco: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..=1)).collect();
    let active: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..=1)).collect();
    let cardio: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..=1)).collect();

    df! {
        "id" => ids,
        "age" => age,
        "gender" => gender,
        "height" => height,
        "weight" => weight,
        "ap_hi" => ap_hi,
        "ap_lo" => ap_lo,
        "cholesterol" => cholesterol,
        "gluc" => gluc,
        "smoke" => smoke,
        "alco" => alco,
        "active" => active,
        "cardio" => cardio,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("medical_examination.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Read a column as `f64` values, panicking on nulls
pub fn f64_values(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

/// Read a column as `i64` values, panicking on nulls
pub fn i64_values(df: &DataFrame, name: &str) -> Vec<i64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Int64)
        .unwrap()
        .i64()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

/// Reference Pearson correlation via the textbook two-pass formula
pub fn naive_pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;
    let cov: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    let vx: f64 = x.iter().map(|a| (a - mx).powi(2)).sum();
    let vy: f64 = y.iter().map(|b| (b - my).powi(2)).sum();
    cov / (vx.sqrt() * vy.sqrt())
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
