use crate::config::types::MlboardConfig;
use crate::duration::MAX_PRECISION;
use crate::errors::ConfigError;
use crate::results::ResultFilter;

/// Check cross-field constraints that serde cannot express.
pub fn validate_config(config: &MlboardConfig) -> Result<(), ConfigError> {
    let thresholds = config.status_thresholds();
    if thresholds.lost_after_secs <= thresholds.maybe_lost_after_secs {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "status.lost_after_secs ({}) must be greater than status.maybe_lost_after_secs ({})",
                thresholds.lost_after_secs, thresholds.maybe_lost_after_secs
            ),
        });
    }

    if config.display.duration_precision > MAX_PRECISION {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "display.duration_precision ({}) must be at most {}",
                config.display.duration_precision, MAX_PRECISION
            ),
        });
    }

    if config.display.complete_class.trim().is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "display.complete_class must not be empty".to_string(),
        });
    }

    ResultFilter::new(&config.results.filter).map_err(|e| {
        ConfigError::InvalidConfiguration {
            message: e.to_string(),
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&MlboardConfig::default()).is_ok());
    }

    #[test]
    fn test_thresholds_must_be_ordered() {
        let mut config = MlboardConfig::default();
        config.status.maybe_lost_after_secs = Some(3600);
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("lost_after_secs"));

        config.status.lost_after_secs = Some(7200);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_precision_is_bounded() {
        let mut config = MlboardConfig::default();
        config.display.duration_precision = 12;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_filter_must_compile() {
        let mut config = MlboardConfig::default();
        config.results.filter = "(".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_complete_class_required() {
        let mut config = MlboardConfig::default();
        config.display.complete_class = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }
}
