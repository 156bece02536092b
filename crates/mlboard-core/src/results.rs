//! Selection of which result metrics show up on the dashboard.

use fancy_regex::Regex;
use tracing::warn;

use crate::errors::MlboardError;

/// Loss, likelihood and accuracy style metrics plus `epoch`, `eta` and `lr`.
/// Names starting with `__` are private and never shown.
pub const DEFAULT_RESULT_FILTER: &str =
    r"^(?!__)((.*_)?(n?ll|bpd|loss|acc(uracy)?|lb)(_.*)?|epoch|eta|lr)$";

#[derive(Debug, thiserror::Error)]
pub enum ResultFilterError {
    #[error("Invalid result filter '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },
}

impl MlboardError for ResultFilterError {
    fn error_code(&self) -> &'static str {
        match self {
            ResultFilterError::InvalidPattern { .. } => "RESULT_FILTER_INVALID",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub struct ResultFilter {
    regex: Regex,
}

impl ResultFilter {
    pub fn new(pattern: &str) -> Result<Self, ResultFilterError> {
        let regex = Regex::new(pattern).map_err(|e| ResultFilterError::InvalidPattern {
            pattern: pattern.to_string(),
            source: Box::new(e),
        })?;
        Ok(Self { regex })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether a result named `name` should be displayed.
    pub fn is_match(&self, name: &str) -> bool {
        match self.regex.is_match(name) {
            Ok(matched) => matched,
            Err(e) => {
                warn!(
                    event = "core.results.match_failed",
                    name = name,
                    pattern = self.regex.as_str(),
                    error = %e,
                    "Result filter evaluation failed - hiding result"
                );
                false
            }
        }
    }

    /// Keep the matching names, preserving input order.
    pub fn filter<'a, I>(&self, names: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().filter(|name| self.is_match(name)).collect()
    }
}

impl Default for ResultFilter {
    fn default() -> Self {
        Self::new(DEFAULT_RESULT_FILTER).expect("default result filter is a valid pattern")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_keeps_training_metrics() {
        let filter = ResultFilter::default();
        for name in [
            "loss",
            "train_loss",
            "valid_loss_mean",
            "nll",
            "test_ll",
            "bpd",
            "acc",
            "test_accuracy",
            "elbo_lb",
            "epoch",
            "eta",
            "lr",
        ] {
            assert!(filter.is_match(name), "{name} should match");
        }
    }

    #[test]
    fn test_default_filter_hides_other_names() {
        let filter = ResultFilter::default();
        for name in ["__loss", "__private", "step", "lossy", "learning_rate", "epochs"] {
            assert!(!filter.is_match(name), "{name} should not match");
        }
    }

    #[test]
    fn test_filter_preserves_order() {
        let filter = ResultFilter::default();
        let names = ["step", "train_loss", "__acc", "lr", "epoch"];
        assert_eq!(filter.filter(names), vec!["train_loss", "lr", "epoch"]);
    }

    #[test]
    fn test_custom_pattern() {
        let filter = ResultFilter::new("^valid_").unwrap();
        assert!(filter.is_match("valid_loss"));
        assert!(!filter.is_match("train_loss"));
        assert_eq!(filter.pattern(), "^valid_");
    }

    #[test]
    fn test_invalid_pattern_is_user_error() {
        let err = ResultFilter::new("(unclosed").unwrap_err();
        assert_eq!(err.error_code(), "RESULT_FILTER_INVALID");
        assert!(err.is_user_error());
        assert!(err.to_string().contains("(unclosed"));
    }
}
