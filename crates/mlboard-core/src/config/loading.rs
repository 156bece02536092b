//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.mlboard/config.toml` (global user preferences)
//! 3. **Project config** - `./.mlboard/config.toml` (project-specific overrides)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::{DisplayConfig, MlboardConfig, ResultsConfig, StatusConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

const CONFIG_DIR: &str = ".mlboard";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed, or
/// if the merged configuration fails validation. Missing files are not errors.
pub fn load_hierarchy() -> Result<MlboardConfig, ConfigError> {
    let mut config = MlboardConfig::default();

    if let Some(path) = user_config_path() {
        config = merge_optional(config, &path)?;
    }

    let cwd = std::env::current_dir()
        .map_err(|e| ConfigError::CurrentDirUnavailable { source: e })?;
    config = merge_optional(config, &cwd.join(CONFIG_DIR).join(CONFIG_FILE))?;

    validate_config(&config)?;
    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

fn merge_optional(base: MlboardConfig, path: &Path) -> Result<MlboardConfig, ConfigError> {
    match load_config_file(path) {
        Ok(loaded) => {
            debug!(
                event = "core.config.file_loaded",
                path = %path.display(),
            );
            Ok(merge_configs(base, loaded))
        }
        Err(e) if e.is_not_found() => Ok(base),
        Err(e) => Err(e),
    }
}

/// Load a single configuration file.
pub fn load_config_file(path: &Path) -> Result<MlboardConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.display().to_string(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Optional fields override only when present. Plain fields override only
/// when they differ from the built-in default, so a project config that
/// omits a section keeps the user's values.
pub fn merge_configs(base: MlboardConfig, override_config: MlboardConfig) -> MlboardConfig {
    let default_display = DisplayConfig::default();
    let default_results = ResultsConfig::default();

    MlboardConfig {
        status: StatusConfig {
            maybe_lost_after_secs: override_config
                .status
                .maybe_lost_after_secs
                .or(base.status.maybe_lost_after_secs),
            lost_after_secs: override_config
                .status
                .lost_after_secs
                .or(base.status.lost_after_secs),
        },
        display: DisplayConfig {
            date_format: prefer_explicit(
                base.display.date_format,
                override_config.display.date_format,
                &default_display.date_format,
            ),
            complete_class: prefer_explicit(
                base.display.complete_class,
                override_config.display.complete_class,
                &default_display.complete_class,
            ),
            duration_precision: prefer_explicit(
                base.display.duration_precision,
                override_config.display.duration_precision,
                &default_display.duration_precision,
            ),
        },
        results: ResultsConfig {
            filter: prefer_explicit(
                base.results.filter,
                override_config.results.filter,
                &default_results.filter,
            ),
        },
    }
}

fn prefer_explicit<T: PartialEq>(base: T, override_value: T, default: &T) -> T {
    if override_value != *default {
        override_value
    } else {
        base
    }
}
