//! Run summary report

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::PercentileBounds;

/// Summary of one visualizer run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows_loaded: usize,
    pub rows_filtered: usize,
    pub category_groups: usize,
    pub correlation_columns: usize,
    pub bounds: Vec<(String, PercentileBounds)>,
    pub load_time: Duration,
    pub categorical_time: Duration,
    pub heatmap_time: Duration,
}

impl RunSummary {
    pub fn new(rows_loaded: usize) -> Self {
        Self {
            rows_loaded,
            rows_filtered: rows_loaded,
            ..Default::default()
        }
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = elapsed;
    }

    pub fn set_categorical_time(&mut self, elapsed: Duration) {
        self.categorical_time = elapsed;
    }

    pub fn set_heatmap_time(&mut self, elapsed: Duration) {
        self.heatmap_time = elapsed;
    }

    pub fn rows_removed(&self) -> usize {
        self.rows_loaded.saturating_sub(self.rows_filtered)
    }

    /// Percentage of loaded rows dropped as outliers.
    pub fn removed_pct(&self) -> f64 {
        if self.rows_loaded > 0 {
            self.rows_removed() as f64 / self.rows_loaded as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Rows Loaded"), Cell::new(self.rows_loaded)]);
        table.add_row(vec![
            Cell::new("🗑️  Rows Removed (Outliers)"),
            Cell::new(format!("{} ({:.1}%)", self.rows_removed(), self.removed_pct())).fg(
                if self.rows_removed() == 0 {
                    Color::White
                } else {
                    Color::Yellow
                },
            ),
        ]);
        table.add_row(vec![
            Cell::new("✅ Rows Correlated"),
            Cell::new(self.rows_filtered)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("📊 Category Groups"),
            Cell::new(self.category_groups),
        ]);
        table.add_row(vec![
            Cell::new("🔗 Correlation Columns"),
            Cell::new(self.correlation_columns),
        ]);
        for (column, bounds) in &self.bounds {
            table.add_row(vec![
                Cell::new(format!("📏 {} band", column)),
                Cell::new(format!("[{:.2}, {:.2}]", bounds.lower, bounds.upper)),
            ]);
        }

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        println!();
        println!(
            "    {} load {:.2?} · catplot {:.2?} · heatmap {:.2?}",
            style("⏱").dim(),
            self.load_time,
            self.categorical_time,
            self.heatmap_time
        );
    }
}
