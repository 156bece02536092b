use crate::errors::MlboardError;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to encode setting '{key}': {source}")]
    EncodeFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl MlboardError for SettingsError {
    fn error_code(&self) -> &'static str {
        match self {
            SettingsError::EncodeFailed { .. } => "SETTINGS_ENCODE_FAILED",
        }
    }
}
