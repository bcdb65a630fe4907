//! Decoded response bodies.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ValidationError;

/// The body returned by a successful verb.
///
/// A body whose media type has a registered codec is decoded into a
/// [`Value`]; anything else (no `content-type`, unknown media type, empty
/// body) is handed back as the raw bytes.
///
/// ## Examples
///
/// ```rust
/// use slumber::Content;
/// use serde_json::json;
///
/// let decoded = Content::Decoded(json!({"result": ["a", "b", "c"]}));
/// assert_eq!(decoded.as_value().unwrap()["result"][0], "a");
///
/// let raw = Content::Raw("Mocked Content".into());
/// assert_eq!(raw.as_text(), Some("Mocked Content"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Body decoded by a codec.
    Decoded(Value),
    /// Body returned as received.
    Raw(Bytes),
}

impl Content {
    /// Returns `true` if a codec decoded the body.
    pub fn is_decoded(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }

    /// Returns the decoded value, `None` for raw bodies.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Decoded(v) => Some(v),
            Self::Raw(_) => None,
        }
    }

    /// Returns the raw bytes, `None` for decoded bodies.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Raw(b) => Some(b),
            Self::Decoded(_) => None,
        }
    }

    /// Returns a raw body as text if it is valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Converts into the decoded value, returning `Err(self)` for raw bodies.
    pub fn into_value(self) -> Result<Value, Self> {
        match self {
            Self::Decoded(v) => Ok(v),
            other => Err(other),
        }
    }

    /// Deserializes the body into `T`.
    ///
    /// Decoded values are converted directly. Raw bodies are parsed as JSON
    /// whatever media type the response declared, so a body that no codec
    /// claimed (such as `text/plain`) usually fails here.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::JsonParse`] if the value does not fit `T`
    /// or a raw body is not JSON.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ValidationError> {
        match self {
            Self::Decoded(v) => Ok(T::deserialize(v)?),
            Self::Raw(b) => Ok(serde_json::from_slice(b)?),
        }
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Self::Decoded(value)
    }
}

impl From<Bytes> for Content {
    fn from(bytes: Bytes) -> Self {
        Self::Raw(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Listing {
        result: Vec<String>,
    }

    #[test]
    fn test_deserialize_decoded() {
        let content = Content::Decoded(json!({"result": ["a", "b", "c"]}));
        let listing: Listing = content.deserialize().unwrap();
        assert_eq!(listing.result, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_deserialize_raw_json() {
        let content = Content::Raw(Bytes::from_static(br#"{"result": []}"#));
        let listing: Listing = content.deserialize().unwrap();
        assert!(listing.result.is_empty());
    }

    #[test]
    fn test_deserialize_raw_text_fails() {
        let content = Content::Raw(Bytes::from_static(b"Mocked Content"));
        let err = content.deserialize::<Listing>().unwrap_err();
        assert!(matches!(err, ValidationError::JsonParse(_)));
    }

    #[test]
    fn test_raw_accessors() {
        let content = Content::from(Bytes::from_static(b"plain"));
        assert!(!content.is_decoded());
        assert_eq!(content.as_value(), None);
        assert_eq!(content.as_text(), Some("plain"));
        assert!(content.into_value().is_err());
    }

    #[test]
    fn test_invalid_utf8_has_no_text() {
        let content = Content::Raw(Bytes::from_static(&[0xff, 0xfe]));
        assert_eq!(content.as_bytes(), Some(&[0xff, 0xfe][..]));
        assert_eq!(content.as_text(), None);
    }
}
