use std::error::Error;

/// Base trait for all application errors
pub trait MlboardError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the application
pub type MlboardResult<T> = Result<T, Box<dyn MlboardError>>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Could not determine the current directory: {source}")]
    CurrentDirUnavailable {
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Missing config files are expected and never fatal.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::ReadFailed { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

impl MlboardError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ReadFailed { .. } => "CONFIG_READ_FAILED",
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::CurrentDirUnavailable { .. } => "CONFIG_CWD_UNAVAILABLE",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigParseError { .. } | ConfigError::InvalidConfiguration { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mlboard_result() {
        let _result: MlboardResult<i32> = Ok(42);
    }

    #[test]
    fn test_invalid_configuration_display() {
        let error = ConfigError::InvalidConfiguration {
            message: "lost_after_secs must exceed maybe_lost_after_secs".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration: lost_after_secs must exceed maybe_lost_after_secs"
        );
        assert_eq!(error.error_code(), "INVALID_CONFIGURATION");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_config_parse_error() {
        let error = ConfigError::ConfigParseError {
            path: "/tmp/config.toml".to_string(),
            message: "invalid TOML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse config file '/tmp/config.toml': invalid TOML syntax"
        );
        assert_eq!(error.error_code(), "CONFIG_PARSE_ERROR");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_not_found_is_detected() {
        let error = ConfigError::ReadFailed {
            path: "/nope/config.toml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(error.is_not_found());
        assert!(!error.is_user_error());

        let denied = ConfigError::ReadFailed {
            path: "/root/config.toml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!denied.is_not_found());
    }
}
