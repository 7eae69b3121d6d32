//! Scatter charts: accuracy vs confidence and detection timelines.

use super::{plot_error, px, series_color};
use crate::constants::plot::{FONT, REGRESSION_COLUMNS, REGRESSION_ROW_HEIGHT, TIMELINE_MAX_RADIUS};
use crate::error::Result;
use plotters::prelude::*;
use std::path::Path;

/// Accuracy range drawn on the y axis, padded so 0/1 points stay visible.
const ACCURACY_RANGE: std::ops::Range<f64> = -0.1..1.1;

/// Observations and a fitted curve for one species.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesSeries {
    /// Species label.
    pub species: String,
    /// `(confidence, accuracy)` observations.
    pub points: Vec<(f64, f64)>,
    /// Fitted curve as `(confidence, predicted accuracy)`; empty when unfitted.
    pub curve: Vec<(f64, f64)>,
}

/// Overlay every species on one accuracy vs confidence chart.
pub fn render_species_scatter(series: &[SpeciesSeries], title: &str, path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error(path))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0.0..1.0, ACCURACY_RANGE)
        .map_err(plot_error(path))?;

    chart
        .configure_mesh()
        .x_desc("Combined Confidence")
        .y_desc("Accuracy")
        .draw()
        .map_err(plot_error(path))?;

    for (i, s) in series.iter().enumerate() {
        let color = series_color(i);
        chart
            .draw_series(
                s.points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.mix(0.6).filled())),
            )
            .map_err(plot_error(path))?
            .label(s.species.as_str())
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));

        if !s.curve.is_empty() {
            chart
                .draw_series(LineSeries::new(s.curve.iter().copied(), color.stroke_width(2)))
                .map_err(plot_error(path))?;
        }
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT, 12))
            .draw()
            .map_err(plot_error(path))?;
    }

    root.present().map_err(plot_error(path))?;
    Ok(())
}

/// One panel per species, two per row, each with its regression line.
pub fn render_regression_grid(series: &[SpeciesSeries], path: &Path) -> Result<()> {
    let rows = series.len().div_ceil(REGRESSION_COLUMNS).max(1);
    let size = (
        px(REGRESSION_COLUMNS) * 480,
        px(rows) * REGRESSION_ROW_HEIGHT,
    );

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error(path))?;
    let panels = root.split_evenly((rows, REGRESSION_COLUMNS));

    for (i, (s, panel)) in series.iter().zip(panels.iter()).enumerate() {
        let color = series_color(i);
        let mut chart = ChartBuilder::on(panel)
            .caption(&s.species, (FONT, 16))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(0.0..1.0, ACCURACY_RANGE)
            .map_err(plot_error(path))?;

        chart
            .configure_mesh()
            .x_labels(5)
            .y_labels(5)
            .x_desc("Confidence")
            .y_desc("Accuracy")
            .draw()
            .map_err(plot_error(path))?;

        chart
            .draw_series(
                s.points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.mix(0.6).filled())),
            )
            .map_err(plot_error(path))?;

        if !s.curve.is_empty() {
            chart
                .draw_series(LineSeries::new(s.curve.iter().copied(), RED.stroke_width(2)))
                .map_err(plot_error(path))?;
        }
    }

    root.present().map_err(plot_error(path))?;
    Ok(())
}

/// Detections of one recording over time.
///
/// `detections` holds `(species row, begin time, confidence)`; marker size
/// grows with confidence.
pub fn render_timeline(
    species: &[String],
    detections: &[(usize, f64, f64)],
    title: &str,
    path: &Path,
) -> Result<()> {
    let n = species.len().max(1);
    let height = (px(n) * 40 + 160).max(400);
    let max_time = detections
        .iter()
        .map(|&(_, t, _)| t)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let root = SVGBackend::new(path, (1400, height)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error(path))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(200)
        .build_cartesian_2d(0.0..max_time * 1.05, (0..n).into_segmented())
        .map_err(plot_error(path))?;

    let species_label = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) => species.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .y_labels(n)
        .y_label_formatter(&species_label)
        .x_desc("Begin Time (s)")
        .y_desc("Species")
        .draw()
        .map_err(plot_error(path))?;

    chart
        .draw_series(detections.iter().map(|&(row, time, confidence)| {
            let radius = (confidence.clamp(0.0, 1.0) * TIMELINE_MAX_RADIUS).max(1.0);
            Circle::new(
                (time, SegmentValue::CenterOf(row)),
                radius,
                series_color(row).mix(0.7).filled(),
            )
        }))
        .map_err(plot_error(path))?;

    root.present().map_err(plot_error(path))?;
    Ok(())
}
