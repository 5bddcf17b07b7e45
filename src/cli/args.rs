//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::render::{CATPLOT_FILE, HEATMAP_FILE};

/// Medviz - Derive cardiovascular risk indicators and plot their distribution and correlations
#[derive(Parser, Debug)]
#[command(name = "medviz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV file with medical examination records
    #[arg(short, long, default_value = "medical_examination.csv")]
    pub input: PathBuf,

    /// Directory where catplot.png and heatmap.png are written
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Also write category counts, outlier bounds and the correlation
    /// matrix as JSON to this path
    #[arg(long)]
    pub export_json: Option<PathBuf>,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Suppress banner and step output (logging is still controlled by RUST_LOG)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Path of the categorical count plot.
    pub fn catplot_path(&self) -> PathBuf {
        self.output_dir.join(CATPLOT_FILE)
    }

    /// Path of the correlation heatmap.
    pub fn heatmap_path(&self) -> PathBuf {
        self.output_dir.join(HEATMAP_FILE)
    }
}
