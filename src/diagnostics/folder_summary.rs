//! Summary of per-species folders of detection tables.
//!
//! Each folder is named `<Scientific>_<Common>` and holds detection tables of
//! recordings known to contain that species. Per table, only detections above
//! the confidence floor count: the highest one feeds the folder's average
//! confidence and the rest feed the average number of other species.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::cli::FolderSummaryArgs;
use crate::collector::{subdirectories, tables_in};
use crate::config::Config;
use crate::constants::output_files::{
    FOLDER_CONFIDENCE_SVG, FOLDER_OTHERS_SVG, FOLDER_SUMMARY_CSV,
};
use crate::error::Result;
use crate::output::{OutputOptions, ensure_dir, write_table};
use crate::plot::{BarChart, render_bar_chart};
use crate::table::{ClassifierRow, TableRow, parse_confidence, read_table};

/// Summary of one species folder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderSummary {
    /// Scientific name from the folder name.
    #[serde(rename = "Scientific Name")]
    pub scientific_name: String,
    /// Common name from the folder name.
    #[serde(rename = "Common Name")]
    pub common_name: String,
    /// Tables read.
    #[serde(rename = "Files")]
    pub files: usize,
    /// Mean of each table's highest qualifying confidence; empty when no
    /// table has one.
    #[serde(rename = "Average Confidence")]
    pub average_confidence: Option<f64>,
    /// Mean number of qualifying detections beyond the first, per table.
    #[serde(rename = "Average Other Species")]
    pub average_other_species: Option<f64>,
}

impl TableRow for FolderSummary {
    const HEADER: &'static [&'static str] = &[
        "Scientific Name",
        "Common Name",
        "Files",
        "Average Confidence",
        "Average Other Species",
    ];
}

/// Split `<Scientific>_<Common>` into its two names.
pub fn split_folder_name(name: &str) -> (String, String) {
    let mut parts = name.split('_');
    let scientific = parts.next().unwrap_or_default().to_string();
    let common = parts.next().unwrap_or_default().to_string();
    (scientific, common)
}

/// Highest qualifying confidence and the count of other qualifying
/// detections in one table.
pub fn table_stats(confidences: &[f64], floor: f64) -> (Option<f64>, usize) {
    let above: Vec<f64> = confidences.iter().copied().filter(|&c| c > floor).collect();
    let max = above.iter().copied().reduce(f64::max);
    (max, above.len().saturating_sub(1))
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Summarize one species folder.
pub fn summarize_folder(folder: &Path, floor: f64) -> Result<FolderSummary> {
    let name = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (scientific_name, common_name) = split_folder_name(&name);

    let mut highest = Vec::new();
    let mut others = Vec::new();
    let tables = tables_in(folder)?;

    for table in &tables {
        let rows: Vec<ClassifierRow> = read_table(&table.path)?;
        let confidences: Vec<f64> = rows
            .iter()
            .filter_map(|row| parse_confidence(&row.confidence))
            .collect();
        let (max, other) = table_stats(&confidences, floor);
        debug!("{}: max {max:?}, {other} others", table.path.display());

        highest.extend(max);
        #[allow(clippy::cast_precision_loss)]
        others.push(other as f64);
    }

    Ok(FolderSummary {
        scientific_name,
        common_name,
        files: tables.len(),
        average_confidence: mean(&highest),
        average_other_species: mean(&others),
    })
}

/// Summarize every species folder under `root`, in path order.
pub fn summarize_folders(root: &Path, floor: f64) -> Result<Vec<FolderSummary>> {
    subdirectories(root)?
        .iter()
        .map(|folder| summarize_folder(folder, floor))
        .collect()
}

/// Execute the folder-summary command.
///
/// # Errors
///
/// Returns an error if the root is missing, a table cannot be read, or an
/// output cannot be written.
pub fn execute(
    args: &FolderSummaryArgs,
    config: &Config,
    options: OutputOptions,
) -> Result<PathBuf> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.paths.output_dir.clone());
    let floor = args
        .min_confidence
        .unwrap_or(config.folder_summary.min_confidence);

    let summaries = summarize_folders(&args.root, floor)?;

    ensure_dir(&output_dir)?;
    let csv_path = output_dir.join(FOLDER_SUMMARY_CSV);
    write_table(&csv_path, &summaries, options.csv_bom)?;

    let bars = |value: fn(&FolderSummary) -> Option<f64>| -> Vec<(String, f64)> {
        summaries
            .iter()
            .map(|s| (s.common_name.clone(), value(s).unwrap_or(0.0)))
            .collect()
    };
    render_bar_chart(
        &BarChart {
            title: "Average Highest Confidence Score".to_string(),
            x_desc: "Species".to_string(),
            y_desc: "Average Confidence".to_string(),
            bars: bars(|s| s.average_confidence),
        },
        &output_dir.join(FOLDER_CONFIDENCE_SVG),
    )?;
    render_bar_chart(
        &BarChart {
            title: format!("Average Count of Other Species (Confidence > {floor})"),
            x_desc: "Species".to_string(),
            y_desc: "Average Count".to_string(),
            bars: bars(|s| s.average_other_species),
        },
        &output_dir.join(FOLDER_OTHERS_SVG),
    )?;

    info!(
        "Summarized {} species folders into {}",
        summaries.len(),
        output_dir.display()
    );
    Ok(csv_path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_split_folder_name() {
        assert_eq!(
            split_folder_name("Malurus cyaneus_Superb Fairywren"),
            ("Malurus cyaneus".to_string(), "Superb Fairywren".to_string())
        );
        assert_eq!(
            split_folder_name("Brolga"),
            ("Brolga".to_string(), String::new())
        );
    }

    #[test]
    fn test_table_stats_floor_is_exclusive() {
        assert_eq!(table_stats(&[0.5, 0.7, 0.9, 0.2], 0.5), (Some(0.9), 1));
        assert_eq!(table_stats(&[0.5, 0.1], 0.5), (None, 0));
        assert_eq!(table_stats(&[], 0.5), (None, 0));
    }

    #[test]
    fn test_summarize_folder() {
        let root = tempfile::tempdir().unwrap();
        let folder = root.path().join("Grus rubicunda_Brolga");
        fs::create_dir(&folder).unwrap();
        fs::write(
            folder.join("a.csv"),
            "Common Name,Confidence\nBrolga,0.9\nMagpie,0.6\nCrow,0.7\n",
        )
        .unwrap();
        fs::write(folder.join("b.csv"), "Common Name,Confidence\nBrolga,0.7\n").unwrap();
        fs::write(folder.join("c.csv"), "Common Name,Confidence\nBrolga,0.3\n").unwrap();

        let summaries = summarize_folders(root.path(), 0.5).unwrap();
        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert_eq!(s.scientific_name, "Grus rubicunda");
        assert_eq!(s.common_name, "Brolga");
        assert_eq!(s.files, 3);
        assert!((s.average_confidence.unwrap() - 0.8).abs() < 1e-12);
        assert!((s.average_other_species.unwrap() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_folder_without_qualifying_confidence() {
        let root = tempfile::tempdir().unwrap();
        let folder = root.path().join("Podargus strigoides_Tawny Frogmouth");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("a.csv"), "Common Name,Confidence\nTawny Frogmouth,0.2\n").unwrap();

        let s = summarize_folder(&folder, 0.5).unwrap();
        assert_eq!(s.average_confidence, None);
        assert_eq!(s.average_other_species, Some(0.0));
    }
}
