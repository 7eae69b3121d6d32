//! Confusion matrix heatmap.

use super::{plot_error, px};
use crate::constants::plot::{FONT, HEATMAP_CELL, HEATMAP_MIN_EDGE};
use crate::error::Result;
use crate::scoring::ConfusionMatrix;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// Light end of the count gradient.
const LOW: (f64, f64, f64) = (247.0, 251.0, 255.0);
/// Dark end of the count gradient.
const HIGH: (f64, f64, f64) = (8.0, 48.0, 107.0);

/// Render `matrix` as an annotated heatmap.
///
/// True labels run down the rows, predicted labels across the columns.
pub fn render_heatmap(matrix: &ConfusionMatrix, title: &str, path: &Path) -> Result<()> {
    let n = matrix.len();
    let labels = matrix.labels();
    let edge = (px(n) * HEATMAP_CELL + 240).max(HEATMAP_MIN_EDGE);

    let root = SVGBackend::new(path, (edge, edge)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error(path))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 24))
        .margin(20)
        .x_label_area_size(140)
        .y_label_area_size(160)
        .build_cartesian_2d((0..n).into_segmented(), (0..n).into_segmented())
        .map_err(plot_error(path))?;

    // Row 0 is drawn at the top.
    let row_label = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) if *i < n => labels[n - 1 - *i].clone(),
        _ => String::new(),
    };
    let col_label = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) if *i < n => labels[*i].clone(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&col_label)
        .y_label_formatter(&row_label)
        .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
        .y_label_style((FONT, 12))
        .x_desc("Predicted Species")
        .y_desc("True Species")
        .draw()
        .map_err(plot_error(path))?;

    #[allow(clippy::cast_precision_loss)]
    let max = matrix.max_count().max(1) as f64;
    let cells: Vec<(usize, usize, u64)> = (0..n)
        .flat_map(|row| (0..n).map(move |col| (row, col)))
        .map(|(row, col)| (row, col, matrix.count(row, col)))
        .collect();

    chart
        .draw_series(cells.iter().map(|&(row, col, count)| {
            #[allow(clippy::cast_precision_loss)]
            let color = shade(count as f64 / max);
            let y = n - 1 - row;
            Rectangle::new(
                [
                    (SegmentValue::Exact(col), SegmentValue::Exact(y)),
                    (SegmentValue::Exact(col + 1), SegmentValue::Exact(y + 1)),
                ],
                color.filled(),
            )
        }))
        .map_err(plot_error(path))?;

    chart
        .draw_series(cells.iter().map(|&(row, col, count)| {
            let font = (FONT, 14).into_font();
            #[allow(clippy::cast_precision_loss)]
            let style = if count as f64 / max > 0.5 {
                font.color(&WHITE)
            } else {
                font.color(&BLACK)
            };
            let style = style.pos(Pos::new(HPos::Center, VPos::Center));
            Text::new(
                count.to_string(),
                (SegmentValue::CenterOf(col), SegmentValue::CenterOf(n - 1 - row)),
                style,
            )
        }))
        .map_err(plot_error(path))?;

    root.present().map_err(plot_error(path))?;
    Ok(())
}

/// Gradient color for an intensity in `0.0..=1.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn shade(intensity: f64) -> RGBColor {
    let t = intensity.clamp(0.0, 1.0);
    let mix = |a: f64, b: f64| (b - a).mul_add(t, a).round() as u8;
    RGBColor(mix(LOW.0, HIGH.0), mix(LOW.1, HIGH.1), mix(LOW.2, HIGH.2))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::scoring::LabelPair;

    #[test]
    fn test_shade_endpoints() {
        assert_eq!(shade(0.0), RGBColor(247, 251, 255));
        assert_eq!(shade(1.0), RGBColor(8, 48, 107));
        assert_eq!(shade(7.0), shade(1.0));
    }

    #[test]
    fn test_render_heatmap_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.svg");
        let pairs = [
            LabelPair::new("Magpie", "Magpie"),
            LabelPair::new("Magpie", "Crow"),
        ];
        let matrix = ConfusionMatrix::from_pairs(&pairs, &[]).unwrap();

        render_heatmap(&matrix, "Confusion Matrix", &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Magpie"));
    }
}
