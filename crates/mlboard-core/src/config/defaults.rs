//! Default implementations for configuration types.
//!
//! Used both by `Default` and by serde `#[serde(default = "...")]` attributes.

use crate::config::types::{DisplayConfig, ResultsConfig};
use crate::datetime::DEFAULT_DATE_FORMAT;
use crate::results::DEFAULT_RESULT_FILTER;

pub fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

pub fn default_complete_class() -> String {
    "success".to_string()
}

pub fn default_result_filter() -> String {
    DEFAULT_RESULT_FILTER.to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            complete_class: default_complete_class(),
            duration_precision: 0,
        }
    }
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            filter: default_result_filter(),
        }
    }
}
