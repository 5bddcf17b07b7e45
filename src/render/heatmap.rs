//! Lower-triangle correlation heatmap with annotated cells and a color bar

use anyhow::Result;
use log::debug;
use std::path::Path;

use super::canvas::{Canvas, BLACK, GLYPH_HEIGHT, WHITE};
use super::color::{contrasting_text, diverging};
use crate::pipeline::CorrelationMatrix;

const CELL_SIZE: u32 = 48;
/// Gap between cells, the rasterised 0.5 line width
const LINE_WIDTH: u32 = 1;
const MARGIN: u32 = 20;
const LABEL_GAP: u32 = 8;
const COLORBAR_WIDTH: u32 = 18;
const COLORBAR_GAP: u32 = 30;
const COLORBAR_LABEL_WIDTH: u32 = 50;
/// Color bar height relative to the grid
const COLORBAR_SHRINK: f64 = 0.5;
const COLORBAR_TICKS: usize = 5;

/// Half-width of the color range: the largest visible magnitude, so the
/// scale stays centered at 0.
fn color_range(corr: &CorrelationMatrix, mask: &[Vec<bool>]) -> f64 {
    let n = corr.len();
    let mut range = 0.0f64;
    for i in 0..n {
        for j in 0..n {
            let v = corr.get(i, j);
            if !mask[i][j] && !v.is_nan() {
                range = range.max(v.abs());
            }
        }
    }
    if range > 0.0 {
        range
    } else {
        1.0
    }
}

/// Render the unmasked (strictly lower) triangle of `corr`.
///
/// Each visible cell is annotated with its value to one decimal place.
pub fn render_heatmap(corr: &CorrelationMatrix) -> Canvas {
    let n = corr.len() as u32;
    let mask = corr.upper_triangle_mask();
    let range = color_range(corr, &mask);

    let label_width = corr
        .columns()
        .iter()
        .map(|c| Canvas::text_width(c, 1))
        .max()
        .unwrap_or(0);

    let grid_left = MARGIN + label_width + LABEL_GAP;
    let grid_top = MARGIN;
    let grid_size = n * CELL_SIZE;
    let width = grid_left + grid_size + COLORBAR_GAP + COLORBAR_WIDTH + COLORBAR_LABEL_WIDTH + MARGIN;
    let height = grid_top + grid_size + LABEL_GAP + label_width + MARGIN;
    let mut canvas = Canvas::new(width, height, WHITE);

    for i in 0..n {
        for j in 0..n {
            if mask[i as usize][j as usize] {
                continue;
            }
            let value = corr.get(i as usize, j as usize);
            let fill = diverging(value / range);
            let x = (grid_left + j * CELL_SIZE) as i64;
            let y = (grid_top + i * CELL_SIZE) as i64;
            canvas.fill_rect(x, y, CELL_SIZE - LINE_WIDTH, CELL_SIZE - LINE_WIDTH, fill);

            if !value.is_nan() {
                let center_x = x + (CELL_SIZE / 2) as i64;
                let text_y = y + ((CELL_SIZE - GLYPH_HEIGHT) / 2) as i64;
                canvas.draw_text_centered(
                    center_x,
                    text_y,
                    &format!("{:.1}", value),
                    1,
                    contrasting_text(fill),
                );
            }
        }
    }

    // Axis labels: rows on the left, columns rotated below the grid
    for (idx, name) in corr.columns().iter().enumerate() {
        let offset = (idx as u32 * CELL_SIZE + CELL_SIZE / 2) as i64;
        canvas.draw_text_right(
            (grid_left - LABEL_GAP) as i64,
            grid_top as i64 + offset - GLYPH_HEIGHT as i64 / 2,
            name,
            1,
            BLACK,
        );
        canvas.draw_text_vertical(
            grid_left as i64 + offset - GLYPH_HEIGHT as i64 / 2,
            (grid_top + grid_size + LABEL_GAP + Canvas::text_width(name, 1)) as i64,
            name,
            1,
            BLACK,
        );
    }

    // Color bar, vertically centered on the grid
    let bar_height = (grid_size as f64 * COLORBAR_SHRINK).round() as u32;
    if bar_height >= 2 {
        let bar_left = (grid_left + grid_size + COLORBAR_GAP) as i64;
        let bar_top = (grid_top + (grid_size - bar_height) / 2) as i64;
        for row in 0..bar_height {
            let t = 1.0 - 2.0 * row as f64 / (bar_height - 1) as f64;
            canvas.fill_rect(bar_left, bar_top + row as i64, COLORBAR_WIDTH, 1, diverging(t));
        }
        for tick in 0..COLORBAR_TICKS {
            let frac = tick as f64 / (COLORBAR_TICKS - 1) as f64;
            let y = bar_top + (frac * (bar_height - 1) as f64).round() as i64;
            let label = range * (1.0 - 2.0 * frac);
            let tick_x = bar_left + COLORBAR_WIDTH as i64;
            canvas.hline(tick_x, tick_x + 3, y, BLACK);
            canvas.draw_text(
                tick_x + 6,
                y - GLYPH_HEIGHT as i64 / 2,
                &format!("{:.2}", label),
                1,
                BLACK,
            );
        }
    }

    debug!("rendered {0}x{0} heatmap, color range +/-{1:.3}", n, range);
    canvas
}

/// Render the correlation heatmap and write it to `path`.
pub fn draw_heat_map(corr: &CorrelationMatrix, path: &Path) -> Result<()> {
    render_heatmap(corr).save(path)
}
