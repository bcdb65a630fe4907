//! Body encoding and decoding errors.

use thiserror::Error;

/// Errors while a codec encodes a request body or decodes a response body.
///
/// Each variant corresponds to a specific format.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// JSON encoding or parsing failed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// YAML encoding or parsing failed.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Form encoding failed.
    #[error("Form encoding error: {message}")]
    FormEncode {
        /// Why the value cannot be form-encoded.
        message: String,
    },
}

impl ValidationError {
    /// Creates a form encoding error.
    pub fn form(message: impl Into<String>) -> Self {
        Self::FormEncode {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a parsing error.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::JsonParse(_) | Self::YamlParse(_))
    }
}
