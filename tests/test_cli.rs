//! Tests for CLI argument parsing and the end-to-end binary

use assert_cmd::Command;
use clap::Parser;
use medviz::cli::Cli;
use predicates::prelude::*;
use std::path::PathBuf;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["medviz"]);

    assert_eq!(cli.input, PathBuf::from("medical_examination.csv"));
    assert_eq!(cli.output_dir, PathBuf::from("."));
    assert_eq!(cli.export_json, None);
    assert_eq!(
        cli.infer_schema_length, 10000,
        "Default schema inference should be 10000"
    );
    assert!(!cli.quiet);
}

#[test]
fn test_cli_output_paths() {
    let cli = Cli::parse_from(["medviz", "-i", "data.csv", "-o", "/tmp/plots"]);

    assert_eq!(cli.catplot_path(), PathBuf::from("/tmp/plots/catplot.png"));
    assert_eq!(cli.heatmap_path(), PathBuf::from("/tmp/plots/heatmap.png"));
}

#[test]
fn test_cli_export_and_quiet() {
    let cli = Cli::parse_from([
        "medviz",
        "--export-json",
        "analysis.json",
        "--quiet",
        "--infer-schema-length",
        "0",
    ]);

    assert_eq!(cli.export_json, Some(PathBuf::from("analysis.json")));
    assert!(cli.quiet);
    assert_eq!(cli.infer_schema_length, 0);
}

#[test]
fn test_binary_writes_both_plots_and_export() {
    let mut df = create_random_medical_dataframe(300, 21);
    let (temp_dir, csv_path) = create_temp_csv(&mut df);
    let out_dir = temp_dir.path().join("plots");
    let export_path = temp_dir.path().join("analysis.json");

    Command::cargo_bin("medviz")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .arg("-o")
        .arg(&out_dir)
        .arg("--export-json")
        .arg(&export_path)
        .arg("--quiet")
        .assert()
        .success();

    assert!(out_dir.join("catplot.png").exists());
    assert!(out_dir.join("heatmap.png").exists());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(json["metadata"]["rows_loaded"], 300);
    assert_eq!(json["correlation"]["columns"].as_array().unwrap().len(), 14);
    assert_eq!(json["outlier_bounds"][0]["column"], "height");

    let counts = json["category_counts"].as_array().unwrap();
    let total: u64 = counts.iter().map(|c| c["total"].as_u64().unwrap()).sum();
    assert_eq!(total, 300 * 6);
}

#[test]
fn test_binary_reports_missing_input() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    Command::cargo_bin("medviz")
        .unwrap()
        .arg("-i")
        .arg(temp_dir.path().join("missing.csv"))
        .arg("-o")
        .arg(temp_dir.path())
        .arg("--quiet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to"));
}

#[test]
fn test_quiet_run_prints_nothing() {
    let mut df = create_random_medical_dataframe(120, 4);
    let (temp_dir, csv_path) = create_temp_csv(&mut df);

    Command::cargo_bin("medviz")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .arg("-o")
        .arg(temp_dir.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Saved").not());

    assert!(temp_dir.path().join("heatmap.png").exists());
}
