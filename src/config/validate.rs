//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_scoring(config)?;
    validate_ratios(config)?;
    validate_frequency_bands(config)?;
    Ok(())
}

/// Validate synonym groups and the truth marker.
fn validate_scoring(config: &Config) -> Result<()> {
    for group in &config.scoring.synonyms {
        if group.canonical.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "synonym group has an empty canonical name".to_string(),
            });
        }
        // An empty alias would match every species.
        if group.aliases.iter().any(|alias| alias.trim().is_empty()) {
            return Err(Error::ConfigValidation {
                message: format!("synonym group '{}' has an empty alias", group.canonical),
            });
        }
    }

    if config.scoring.labels.iter().any(|l| l.trim().is_empty()) {
        return Err(Error::ConfigValidation {
            message: "scoring.labels contains an empty label".to_string(),
        });
    }

    Ok(())
}

/// Validate values that must lie in `0.0..=1.0`.
fn validate_ratios(config: &Config) -> Result<()> {
    let ratios = [
        ("thresholds.accuracy_target", config.thresholds.accuracy_target),
        (
            "thresholds.fallback_confidence",
            config.thresholds.fallback_confidence,
        ),
        (
            "folder_summary.min_confidence",
            config.folder_summary.min_confidence,
        ),
    ];

    for (name, value) in ratios {
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::ConfigValidation {
                message: format!("{name} must be between 0.0 and 1.0, got {value}"),
            });
        }
    }

    Ok(())
}

/// Validate that every band has a positive width.
fn validate_frequency_bands(config: &Config) -> Result<()> {
    for band in &config.frequency_bands {
        if band.low_hz >= band.high_hz {
            return Err(Error::ConfigValidation {
                message: format!(
                    "frequency band for '{}' must have low_hz < high_hz, got {}..{}",
                    band.species, band.low_hz, band.high_hz
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FrequencyBand, SynonymGroup};

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_accuracy_target() {
        let mut config = Config::default();
        config.thresholds.accuracy_target = 1.5;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_negative_min_confidence() {
        let mut config = Config::default();
        config.folder_summary.min_confidence = -0.1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_alias() {
        let mut config = Config::default();
        config.scoring.synonyms.push(SynonymGroup {
            canonical: "Raven".to_string(),
            aliases: vec![String::new()],
        });
        let result = validate_config(&config);
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_validate_inverted_band() {
        let mut config = Config::default();
        config.frequency_bands = vec![FrequencyBand {
            species: "Brolga".to_string(),
            low_hz: 2000,
            high_hz: 100,
            group: crate::config::BandGroup::Low,
        }];
        assert!(validate_config(&config).is_err());
    }
}
