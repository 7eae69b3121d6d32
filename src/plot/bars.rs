//! Bar charts.

use super::{plot_error, px, series_color};
use crate::constants::plot::FONT;
use crate::error::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// A vertical bar chart with one bar per label.
#[derive(Debug, Clone, Default)]
pub struct BarChart {
    /// Chart caption.
    pub title: String,
    /// X axis description.
    pub x_desc: String,
    /// Y axis description.
    pub y_desc: String,
    /// `(label, value)` bars in drawing order.
    pub bars: Vec<(String, f64)>,
}

/// Render a vertical bar chart.
pub fn render_bar_chart(bars: &BarChart, path: &Path) -> Result<()> {
    let n = bars.bars.len().max(1);
    let width = (px(n) * 60 + 240).max(800);
    let top = bars
        .bars
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max);
    let top = if top > 0.0 { top * 1.1 } else { 1.0 };

    let root = SVGBackend::new(path, (width, 700)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error(path))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&bars.title, (FONT, 24))
        .margin(20)
        .x_label_area_size(180)
        .y_label_area_size(60)
        .build_cartesian_2d((0..n).into_segmented(), 0.0..top)
        .map_err(plot_error(path))?;

    let labels = &bars.bars;
    let bar_label = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) => labels.get(*i).map(|(l, _)| l.clone()).unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&bar_label)
        .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
        .x_desc(bars.x_desc.as_str())
        .y_desc(bars.y_desc.as_str())
        .draw()
        .map_err(plot_error(path))?;

    chart
        .draw_series(bars.bars.iter().enumerate().map(|(i, (_, value))| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), *value),
                ],
                series_color(0).mix(0.8).filled(),
            );
            bar.set_margin(0, 0, 6, 6);
            bar
        }))
        .map_err(plot_error(path))?;

    root.present().map_err(plot_error(path))?;
    Ok(())
}

/// Render horizontal range bars, `(label, low, high)`, top to bottom.
pub fn render_ranges(
    ranges: &[(String, f64, f64)],
    title: &str,
    x_desc: &str,
    path: &Path,
) -> Result<()> {
    let n = ranges.len().max(1);
    let height = (px(n) * 50 + 160).max(400);
    let right = ranges
        .iter()
        .map(|&(_, _, high)| high)
        .fold(0.0_f64, f64::max);
    let right = if right > 0.0 { right * 1.15 } else { 1.0 };

    let root = SVGBackend::new(path, (1200, height)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error(path))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(220)
        .build_cartesian_2d(0.0..right, (0..n).into_segmented())
        .map_err(plot_error(path))?;

    // First range is drawn at the top.
    let range_label = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) if *i < n => ranges
            .get(n - 1 - *i)
            .map(|(l, _, _)| l.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .y_label_formatter(&range_label)
        .x_desc(x_desc)
        .draw()
        .map_err(plot_error(path))?;

    chart
        .draw_series(ranges.iter().enumerate().map(|(i, &(_, low, high))| {
            let y = n - 1 - i;
            let mut bar = Rectangle::new(
                [
                    (low, SegmentValue::Exact(y)),
                    (high, SegmentValue::Exact(y + 1)),
                ],
                series_color(i).mix(0.8).filled(),
            );
            bar.set_margin(8, 8, 0, 0);
            bar
        }))
        .map_err(plot_error(path))?;

    chart
        .draw_series(ranges.iter().enumerate().map(|(i, &(_, low, high))| {
            let style = (FONT, 12)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Left, VPos::Center));
            Text::new(
                format!(" {low:.0}-{high:.0}"),
                (high, SegmentValue::CenterOf(n - 1 - i)),
                style,
            )
        }))
        .map_err(plot_error(path))?;

    root.present().map_err(plot_error(path))?;
    Ok(())
}
