//! SVG chart rendering.

mod bars;
mod heatmap;
mod scatter;

pub use bars::{BarChart, render_bar_chart, render_ranges};
pub use heatmap::render_heatmap;
pub use scatter::{SpeciesSeries, render_regression_grid, render_species_scatter, render_timeline};

use crate::error::Error;
use plotters::style::{Palette, Palette99, RGBColor};
use std::path::Path;

/// Map a plotters error to [`Error::Plot`] for `path`.
fn plot_error<E: std::fmt::Display>(path: &Path) -> impl Fn(E) -> Error + '_ {
    move |e| Error::Plot {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

/// Distinct color for the `i`th series.
fn series_color(i: usize) -> RGBColor {
    let (r, g, b) = Palette99::COLORS[i % Palette99::COLORS.len()];
    RGBColor(r, g, b)
}

/// Canvas dimension from a pixel count, saturating.
fn px(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
