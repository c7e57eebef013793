//! Error types for Bank Widgets

use thiserror::Error;

/// Main error type for Bank Widgets operations
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Backend fault (HTTP 500)
    #[error("Server error: the backend failed to process the request")]
    Server,

    /// Account creation was rejected for a reason other than a backend fault
    #[error("Invalid routing number")]
    InvalidRoutingNumber,

    /// Non-success HTTP status where a parsed body was expected
    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// Transport-level failure (connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Request or response body could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A currency string could not be converted to cents
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Caller supplied a malformed argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A form transition was requested from a phase that does not allow it
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for WidgetError {
    fn from(err: serde_json::Error) -> Self {
        WidgetError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for WidgetError {
    fn from(err: reqwest::Error) -> Self {
        WidgetError::Network(err.to_string())
    }
}

/// Result type alias using WidgetError
pub type WidgetResult<T> = Result<T, WidgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WidgetError::InvalidAmount("abc".to_string());
        assert_eq!(format!("{}", err), "Invalid amount: abc");
        assert_eq!(
            WidgetError::InvalidRoutingNumber.to_string(),
            "Invalid routing number"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WidgetError = io_err.into();
        assert!(matches!(err, WidgetError::Io(_)));
    }

    #[test]
    fn test_error_from_serde() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: WidgetError = json_err.into();
        assert!(matches!(err, WidgetError::Serialization(_)));
    }
}
