//! Configuration type definitions for mlboard.
//!
//! # Example Configuration
//!
//! ```toml
//! [status]
//! maybe_lost_after_secs = 300
//! lost_after_secs = 3600
//!
//! [display]
//! date_format = "%B %-d, %Y %-I:%M %p"
//! complete_class = "success"
//! duration_precision = 0
//!
//! [results]
//! filter = "^(loss|acc)$"
//! ```

use serde::{Deserialize, Serialize};

/// Main configuration loaded from TOML config files.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MlboardConfig {
    /// Silent-death detection for running experiments
    #[serde(default)]
    pub status: StatusConfig,

    /// How timestamps, badges and durations are rendered
    #[serde(default)]
    pub display: DisplayConfig,

    /// Which result metrics are shown
    #[serde(default)]
    pub results: ResultsConfig,
}

/// Heartbeat thresholds. Unset values use the classifier defaults
/// (300 and 3600 seconds).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StatusConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maybe_lost_after_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lost_after_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    /// chrono format for timestamps a day or more old.
    #[serde(default = "super::defaults::default_date_format")]
    pub date_format: String,

    /// Badge class for finished experiments.
    #[serde(default = "super::defaults::default_complete_class")]
    pub complete_class: String,

    /// Fractional digits for durations.
    #[serde(default)]
    pub duration_precision: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultsConfig {
    /// Regex (lookaround allowed) selecting displayed result names.
    #[serde(default = "super::defaults::default_result_filter")]
    pub filter: String,
}
