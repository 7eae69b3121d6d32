//! Confidence of detections over time for one recording.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::cli::TimelineArgs;
use crate::config::Config;
use crate::constants::output_files::TIMELINE_SVG;
use crate::error::Result;
use crate::output::{OutputOptions, ensure_dir};
use crate::plot::render_timeline;
use crate::table::{DetectionRecord, read_table};

/// Species rows and plotted detections of a timeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    /// Species in first-appearance order; index is the chart row.
    pub species: Vec<String>,
    /// `(species row, begin time, confidence)`.
    pub detections: Vec<(usize, f64, f64)>,
}

/// Lay out detections. Rows without a begin time or confidence are skipped.
pub fn build_timeline(records: &[DetectionRecord]) -> Timeline {
    let mut timeline = Timeline::default();

    for record in records {
        let (Some(time), Some(confidence)) = (record.begin_time(), record.confidence()) else {
            debug!("Skipping detection without time or confidence: {record:?}");
            continue;
        };
        let species = record.common_name.trim();
        let row = match timeline.species.iter().position(|s| s == species) {
            Some(row) => row,
            None => {
                timeline.species.push(species.to_string());
                timeline.species.len() - 1
            }
        };
        timeline.detections.push((row, time, confidence));
    }

    timeline
}

/// Execute the timeline command.
///
/// # Errors
///
/// Returns an error if the detection table cannot be read or the chart cannot
/// be written.
pub fn execute(args: &TimelineArgs, config: &Config, _options: OutputOptions) -> Result<PathBuf> {
    let output = match &args.output {
        Some(path) => path.clone(),
        None => {
            ensure_dir(&config.paths.output_dir)?;
            config.paths.output_dir.join(TIMELINE_SVG)
        }
    };

    let records: Vec<DetectionRecord> = read_table(&args.detections)?;
    let timeline = build_timeline(&records);
    render_timeline(
        &timeline.species,
        &timeline.detections,
        "Confidence of Species Detection over Time",
        &output,
    )?;

    info!(
        "Plotted {} detections of {} species to {}",
        timeline.detections.len(),
        timeline.species.len(),
        output.display()
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(species: &str, begin: &str, confidence: &str) -> DetectionRecord {
        DetectionRecord {
            common_name: species.to_string(),
            begin_time: begin.to_string(),
            confidence: confidence.to_string(),
            ..DetectionRecord::default()
        }
    }

    #[test]
    fn test_rows_follow_first_appearance() {
        let timeline = build_timeline(&[
            detection("Magpie", "0", "0.9"),
            detection("Crow", "3", "0.4"),
            detection("Magpie", "6", "0.7"),
            detection("Brolga", "", "0.7"),
        ]);
        assert_eq!(timeline.species, vec!["Magpie", "Crow"]);
        assert_eq!(
            timeline.detections,
            vec![(0, 0.0, 0.9), (1, 3.0, 0.4), (0, 6.0, 0.7)]
        );
    }
}
