//! Error types for Flashgate
//!
//! This module defines all error types used throughout the gateway,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Flashgate operations
///
/// The two kinds the HTTP layer cares about are `InvalidInput` (caller
/// supplied data of the wrong shape, surfaced as a 4xx) and `Provider`
/// (anything that went wrong talking to the model, surfaced as a generic 500).
/// The remaining variants cover configuration, the gateway client and
/// conversions from library errors.
#[derive(Error, Debug)]
pub enum FlashgateError {
    /// Caller-supplied data violates a documented shape constraint
    #[error("{0}")]
    InvalidInput(String),

    /// Provider-related errors (network, auth, quota, malformed response)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Gateway client errors (non-success status, missing data)
    #[error("Client error: {0}")]
    Client(String),

    /// Gateway answered successfully but without reply data
    #[error("No response received")]
    EmptyReply,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl FlashgateError {
    /// Returns true when the error was caused by the caller's input
    ///
    /// # Examples
    ///
    /// ```
    /// use flashgate::error::FlashgateError;
    ///
    /// assert!(FlashgateError::InvalidInput("missing prompt".into()).is_invalid_input());
    /// assert!(!FlashgateError::Provider("timeout".into()).is_invalid_input());
    /// ```
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Result type alias for Flashgate operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation. Callers that
/// need to branch on the error kind use `downcast_ref::<FlashgateError>()`.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display_is_bare_reason() {
        let error = FlashgateError::InvalidInput("Prompt is required".to_string());
        assert_eq!(error.to_string(), "Prompt is required");
    }

    #[test]
    fn test_provider_error_display() {
        let error = FlashgateError::Provider("API timeout".to_string());
        assert_eq!(error.to_string(), "Provider error: API timeout");
    }

    #[test]
    fn test_config_error_display() {
        let error = FlashgateError::Config("invalid port".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid port");
    }

    #[test]
    fn test_client_error_display() {
        let error = FlashgateError::Client("status 500".to_string());
        assert_eq!(error.to_string(), "Client error: status 500");
    }

    #[test]
    fn test_empty_reply_display() {
        assert_eq!(FlashgateError::EmptyReply.to_string(), "No response received");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: FlashgateError = io_error.into();
        assert!(matches!(error, FlashgateError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: FlashgateError = json_error.into();
        assert!(matches!(error, FlashgateError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: FlashgateError = yaml_error.into();
        assert!(matches!(error, FlashgateError::Yaml(_)));
    }

    #[test]
    fn test_downcast_from_anyhow() {
        let err: anyhow::Error = FlashgateError::InvalidInput("bad".to_string()).into();
        let kind = err.downcast_ref::<FlashgateError>();
        assert!(kind.is_some_and(FlashgateError::is_invalid_input));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FlashgateError>();
    }
}
