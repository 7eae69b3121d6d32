//! Frequency range chart of configured species bands.

use std::path::PathBuf;

use tracing::info;

use crate::cli::FrequencyArgs;
use crate::config::{Config, FrequencyBand};
use crate::constants::output_files::FREQUENCY_SVG;
use crate::error::Result;
use crate::output::{OutputOptions, ensure_dir};
use crate::plot::render_ranges;

/// Bands as `(species, low, high)`, high-pitched group first.
///
/// Order within a group is the configured order.
pub fn ordered_ranges(bands: &[FrequencyBand]) -> Vec<(String, f64, f64)> {
    let mut sorted: Vec<&FrequencyBand> = bands.iter().collect();
    sorted.sort_by_key(|band| band.group);
    sorted
        .into_iter()
        .map(|band| {
            (
                band.species.clone(),
                f64::from(band.low_hz),
                f64::from(band.high_hz),
            )
        })
        .collect()
}

/// Execute the frequency command.
///
/// # Errors
///
/// Returns an error if the chart cannot be written.
pub fn execute(args: &FrequencyArgs, config: &Config, _options: OutputOptions) -> Result<PathBuf> {
    let output = match &args.output {
        Some(path) => path.clone(),
        None => {
            ensure_dir(&config.paths.output_dir)?;
            config.paths.output_dir.join(FREQUENCY_SVG)
        }
    };

    let ranges = ordered_ranges(&config.frequency_bands);
    render_ranges(
        &ranges,
        "Frequency Ranges of Bird Species",
        "Frequency (Hz)",
        &output,
    )?;

    info!("Plotted {} frequency bands to {}", ranges.len(), output.display());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BandGroup;

    #[test]
    fn test_high_group_first_stable_within_group() {
        let band = |species: &str, group| FrequencyBand {
            species: species.to_string(),
            low_hz: 100,
            high_hz: 200,
            group,
        };
        let bands = [
            band("Brolga", BandGroup::Low),
            band("Superb Fairywren", BandGroup::High),
            band("Tawny Frogmouth", BandGroup::Low),
            band("Splendid Fairywren", BandGroup::High),
        ];
        let names: Vec<String> = ordered_ranges(&bands).into_iter().map(|r| r.0).collect();
        assert_eq!(
            names,
            vec![
                "Superb Fairywren",
                "Splendid Fairywren",
                "Brolga",
                "Tawny Frogmouth"
            ]
        );
    }

    #[test]
    fn test_default_bands() {
        let ranges = ordered_ranges(&Config::default().frequency_bands);
        assert_eq!(ranges.len(), 8);
        assert_eq!(ranges[0], ("Superb Fairywren".to_string(), 4000.0, 8000.0));
        assert_eq!(ranges[7], ("Tawny Frogmouth".to_string(), 100.0, 4000.0));
    }
}
