//! Medviz: Medical Examination Visualizer CLI
//!
//! Loads examination records, derives risk indicators and writes a
//! categorical count plot and a correlation heatmap.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use log::info;

use medviz::cli::Cli;
use medviz::pipeline::{
    aggregate_categorical, correlation_matrix, derive_features, filter_outliers,
    load_dataset_with_progress,
};
use medviz::render::{draw_cat_plot, draw_heat_map};
use medviz::report::{export_analysis, AnalysisExport, RunSummary};
use medviz::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_success,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let verbose = !cli.quiet;

    if verbose {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(&cli.input, &cli.output_dir, cli.export_json.as_deref());
    }

    std::fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            cli.output_dir.display()
        )
    })?;

    // Step 1: Load and derive
    if verbose {
        print_step_header(1, "Load & Derive Features");
    }
    let step_start = Instant::now();
    let (df, rows, cols, memory_mb) =
        load_dataset_with_progress(&cli.input, cli.infer_schema_length, verbose)?;
    let df = derive_features(df)?;
    let mut summary = RunSummary::new(rows);
    summary.set_load_time(step_start.elapsed());
    info!("loaded {} ({} rows, {} columns)", cli.input.display(), rows, cols);

    if verbose {
        println!("\n    {} Dataset Statistics:", style("✧").cyan());
        println!("      Rows: {}", rows);
        println!("      Columns: {}", cols);
        println!("      Estimated memory: {:.2} MB", memory_mb);
        print_success("Derived overweight flag and binarized cholesterol/gluc");
    }

    // Step 2: Categorical plot
    if verbose {
        print_step_header(2, "Categorical Plot");
    }
    let step_start = Instant::now();
    let counts = aggregate_categorical(&df)?;
    summary.category_groups = counts.len();

    let catplot_path = cli.catplot_path();
    let spinner = create_spinner("Rendering count plot...", verbose);
    draw_cat_plot(&counts, &catplot_path)?;
    finish_with_success(&spinner, &format!("Saved {}", catplot_path.display()));
    summary.set_categorical_time(step_start.elapsed());
    info!("wrote {}", catplot_path.display());

    if verbose {
        print_count("category group(s)", counts.len(), Some("(cardio, variable, value)"));
    }

    // Step 3: Outlier filter, correlation and heatmap
    if verbose {
        print_step_header(3, "Correlation Heatmap");
    }
    let step_start = Instant::now();
    let filtered = filter_outliers(&df)?;
    summary.rows_filtered = filtered.frame.height();
    summary.bounds = filtered.bounds.clone();

    if verbose {
        if filtered.rows_removed() == 0 {
            print_info("No outlier rows found");
        } else {
            print_count("outlier row(s) removed", filtered.rows_removed(), None);
        }
    }

    let corr = correlation_matrix(&filtered.frame)?;
    summary.correlation_columns = corr.len();

    let heatmap_path = cli.heatmap_path();
    let spinner = create_spinner("Rendering heatmap...", verbose);
    draw_heat_map(&corr, &heatmap_path)?;
    finish_with_success(&spinner, &format!("Saved {}", heatmap_path.display()));
    summary.set_heatmap_time(step_start.elapsed());
    info!("wrote {}", heatmap_path.display());

    // Optional export
    if let Some(export_path) = &cli.export_json {
        let export = AnalysisExport::new(
            &cli.input.display().to_string(),
            &counts,
            &filtered,
            &corr,
        );
        export_analysis(&export, export_path)?;
        info!("wrote {}", export_path.display());
        if verbose {
            print_success(&format!("Exported analysis to {}", export_path.display()));
        }
    }

    if verbose {
        summary.display();
        print_completion();
    }

    Ok(())
}
