//! Root and resource configuration errors.

use thiserror::Error;

/// Errors in root or resource configuration.
///
/// These errors surface as soon as the offending value is used and typically
/// indicate programmer errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required configuration field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The name uses the reserved `_` prefix and cannot address a child resource.
    #[error("Reserved name cannot be used as a resource: {name}")]
    ReservedName {
        /// The rejected name.
        name: String,
    },

    /// A header name or value cannot be sent.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header problem.
        message: String,
    },
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field() {
        let err = ConfigError::missing_field("base_url");
        assert_eq!(err.to_string(), "Missing required field: base_url");
    }

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_reserved_name() {
        let err = ConfigError::ReservedName {
            name: "_store".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Reserved name cannot be used as a resource: _store"
        );
    }
}
