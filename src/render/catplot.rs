//! Grouped bar chart of category counts, one facet per `cardio` value

use anyhow::Result;
use image::Rgb;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::canvas::{Canvas, BLACK, GLYPH_HEIGHT, GRID_GRAY, WHITE};
use super::color::generate_palette;
use crate::pipeline::CategoryCount;

const PANEL_WIDTH: u32 = 480;
const PANEL_HEIGHT: u32 = 420;
const MARGIN_LEFT: u32 = 70;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 50;
const MARGIN_BOTTOM: u32 = 50;
const LEGEND_WIDTH: u32 = 110;
const BAR_FILL: f64 = 0.8;
const TARGET_TICKS: u64 = 5;

/// Smallest "nice" step (1, 2 or 5 times a power of ten) giving at most
/// `TARGET_TICKS` intervals up to `max`.
fn tick_step(max: u64) -> u64 {
    let raw = max.max(1).div_ceil(TARGET_TICKS);
    let mut magnitude = 1;
    while magnitude * 10 <= raw {
        magnitude *= 10;
    }
    [1, 2, 5, 10]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10 * magnitude)
}

/// Render category counts into a faceted bar chart.
///
/// Facets follow ascending `cardio`, bars within a facet follow ascending
/// variable name, and bar colour is keyed on `value`.
pub fn render_catplot(counts: &[CategoryCount]) -> Canvas {
    let facets: BTreeSet<i64> = counts.iter().map(|c| c.cardio).collect();
    let variables: BTreeSet<&str> = counts.iter().map(|c| c.variable.as_str()).collect();
    let values: BTreeSet<i64> = counts.iter().map(|c| c.value).collect();
    let lookup: BTreeMap<(i64, &str, i64), u64> = counts
        .iter()
        .map(|c| ((c.cardio, c.variable.as_str(), c.value), c.total))
        .collect();

    let colors: BTreeMap<i64, Rgb<u8>> = values
        .iter()
        .copied()
        .zip(generate_palette(values.len()))
        .collect();

    let max_total = counts.iter().map(|c| c.total).max().unwrap_or(0);
    let step = tick_step(max_total);
    let y_max = (max_total.div_ceil(step)).max(1) * step;

    let n_facets = facets.len().max(1) as u32;
    let width = n_facets * PANEL_WIDTH + LEGEND_WIDTH;
    let mut canvas = Canvas::new(width, PANEL_HEIGHT, WHITE);

    let plot_w = PANEL_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = PANEL_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    for (facet_idx, &cardio) in facets.iter().enumerate() {
        let left = (facet_idx as u32 * PANEL_WIDTH + MARGIN_LEFT) as i64;
        let top = MARGIN_TOP as i64;
        let bottom = top + plot_h as i64;
        let right = left + plot_w as i64;

        canvas.draw_text_centered(
            (left + right) / 2,
            top - 30,
            &format!("cardio = {}", cardio),
            2,
            BLACK,
        );

        // Gridlines and y ticks
        let mut tick = 0;
        while tick <= y_max {
            let y = bottom - (tick as f64 / y_max as f64 * plot_h as f64).round() as i64;
            if tick > 0 {
                canvas.hline(left + 1, right, y, GRID_GRAY);
            }
            canvas.hline(left - 4, left, y, BLACK);
            canvas.draw_text_right(left - 8, y - GLYPH_HEIGHT as i64 / 2, &tick.to_string(), 1, BLACK);
            tick += step;
        }
        if facet_idx == 0 {
            canvas.draw_text_vertical(
                left - 60,
                (top + bottom) / 2 + Canvas::text_width("total", 1) as i64 / 2,
                "total",
                1,
                BLACK,
            );
        }

        let group_w = plot_w as f64 / variables.len().max(1) as f64;
        let bar_w = group_w * BAR_FILL / values.len().max(1) as f64;

        for (var_idx, &variable) in variables.iter().enumerate() {
            let group_left = left as f64 + var_idx as f64 * group_w + group_w * (1.0 - BAR_FILL) / 2.0;

            for (val_idx, &value) in values.iter().enumerate() {
                let Some(&total) = lookup.get(&(cardio, variable, value)) else {
                    continue;
                };
                let bar_h = (total as f64 / y_max as f64 * plot_h as f64).round() as u32;
                let x = (group_left + val_idx as f64 * bar_w).round() as i64;
                canvas.fill_rect(
                    x,
                    bottom - bar_h as i64,
                    bar_w.floor().max(1.0) as u32,
                    bar_h,
                    colors[&value],
                );
            }

            let center = (left as f64 + (var_idx as f64 + 0.5) * group_w) as i64;
            canvas.draw_text_centered(center, bottom + 10, variable, 1, BLACK);
        }

        canvas.draw_text_centered((left + right) / 2, bottom + 30, "variable", 1, BLACK);
        canvas.vline(left, top, bottom, BLACK);
        canvas.hline(left, right, bottom, BLACK);
    }

    // Legend
    let legend_x = (n_facets * PANEL_WIDTH) as i64 + 10;
    let mut legend_y = (PANEL_HEIGHT / 2) as i64 - 20;
    canvas.draw_text(legend_x, legend_y, "value", 2, BLACK);
    for (value, color) in &colors {
        legend_y += 24;
        canvas.fill_rect(legend_x, legend_y, 14, 14, *color);
        canvas.draw_text(legend_x + 22, legend_y + 1, &value.to_string(), 2, BLACK);
    }

    debug!(
        "rendered catplot: {} facet(s), {} variable(s), y max {}",
        facets.len(),
        variables.len(),
        y_max
    );
    canvas
}

/// Render the category counts and write them to `path`.
pub fn draw_cat_plot(counts: &[CategoryCount], path: &Path) -> Result<()> {
    render_catplot(counts).save(path)
}
