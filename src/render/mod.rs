//! Render module - PNG output for the count plot and the correlation heatmap

pub mod canvas;
pub mod catplot;
pub mod color;
pub mod heatmap;

pub use canvas::Canvas;
pub use catplot::{draw_cat_plot, render_catplot};
pub use heatmap::{draw_heat_map, render_heatmap};

/// File name of the categorical count plot
pub const CATPLOT_FILE: &str = "catplot.png";

/// File name of the correlation heatmap
pub const HEATMAP_FILE: &str = "heatmap.png";
