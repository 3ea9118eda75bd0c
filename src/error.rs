//! Error types for the pagination engine

use thiserror::Error;

/// Result type alias for bookflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a pagination run.
///
/// Malformed input records are never errors: the document layer coerces
/// them to empty values so item-count invariants stay checkable.
#[derive(Error, Debug)]
pub enum Error {
    /// The page configuration cannot produce a usable page area.
    #[error("invalid page configuration: {0}")]
    Config(String),

    /// The measurement oracle failed; no partial pages are exposed.
    #[error("measurement failed: {0}")]
    Measurement(String),

    /// Invalid JSON at the embedding boundary.
    #[error("invalid recipe JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("page_height must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid page configuration: page_height must be positive"
        );

        let err = Error::Measurement("detached surface".to_string());
        assert_eq!(err.to_string(), "measurement failed: detached surface");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
