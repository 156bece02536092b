//! # Configuration System
//!
//! Hierarchical TOML configuration for mlboard.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.mlboard/config.toml` (global user preferences)
//! 3. **Project config** - `./.mlboard/config.toml` (project-specific overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.mlboard/config.toml
//! [status]
//! maybe_lost_after_secs = 600
//! lost_after_secs = 7200
//!
//! [display]
//! date_format = "%Y-%m-%d %H:%M"
//! complete_class = "success"
//!
//! [results]
//! filter = "^(loss|acc)$"
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use mlboard_core::config::MlboardConfig;
//!
//! fn example() -> Result<(), mlboard_core::errors::ConfigError> {
//!     let config = MlboardConfig::load_hierarchy()?;
//!     let thresholds = config.status_thresholds();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{DisplayConfig, MlboardConfig, ResultsConfig, StatusConfig};
pub use validation::validate_config;

use crate::errors::ConfigError;
use crate::results::{ResultFilter, ResultFilterError};
use crate::status::StatusThresholds;

impl MlboardConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }

    pub fn status_thresholds(&self) -> StatusThresholds {
        let defaults = StatusThresholds::default();
        StatusThresholds {
            maybe_lost_after_secs: self
                .status
                .maybe_lost_after_secs
                .unwrap_or(defaults.maybe_lost_after_secs),
            lost_after_secs: self
                .status
                .lost_after_secs
                .unwrap_or(defaults.lost_after_secs),
        }
    }

    pub fn result_filter(&self) -> Result<ResultFilter, ResultFilterError> {
        ResultFilter::new(&self.results.filter)
    }
}
