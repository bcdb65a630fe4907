//! Codec trait and the stock JSON, YAML and form codecs.
//!
//! Codecs work on [`serde_json::Value`], the common in-memory shape for
//! every format a resource can send or receive.

use std::fmt;

use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::error::ValidationError;

/// Encodes request bodies and decodes response bodies for a set of media types.
///
/// ## Examples
///
/// ```rust
/// use slumber::serialize::{Codec, JsonCodec};
///
/// let codec = JsonCodec;
/// assert!(codec.matches("text/x-json"));
/// assert_eq!(codec.content_type(), "application/json");
///
/// let value = codec.loads(br#"{"a": [1, 2]}"#).unwrap();
/// assert_eq!(value["a"][1], 2);
/// ```
pub trait Codec: Send + Sync + fmt::Debug {
    /// Registry name of this codec (e.g. `"json"`).
    fn key(&self) -> &str;

    /// Media types this codec claims, canonical type first.
    fn content_types(&self) -> &[&str];

    /// The canonical media type, sent in `accept` and `content-type`.
    fn content_type(&self) -> &str {
        self.content_types()
            .first()
            .copied()
            .unwrap_or("application/octet-stream")
    }

    /// Returns `true` if this codec claims `media_type`.
    fn matches(&self, media_type: &str) -> bool {
        self.content_types()
            .iter()
            .any(|claimed| claimed.eq_ignore_ascii_case(media_type))
    }

    /// Encodes a value into a request body.
    fn dumps(&self, value: &Value) -> Result<String, ValidationError>;

    /// Decodes a response body.
    fn loads(&self, body: &[u8]) -> Result<Value, ValidationError>;
}

/// JSON codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn key(&self) -> &str {
        "json"
    }

    fn content_types(&self) -> &[&str] {
        &[
            "application/json",
            "application/x-javascript",
            "text/javascript",
            "text/x-javascript",
            "text/x-json",
        ]
    }

    fn dumps(&self, value: &Value) -> Result<String, ValidationError> {
        Ok(serde_json::to_string(value)?)
    }

    fn loads(&self, body: &[u8]) -> Result<Value, ValidationError> {
        Ok(serde_json::from_slice(body)?)
    }
}

/// YAML codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn key(&self) -> &str {
        "yaml"
    }

    fn content_types(&self) -> &[&str] {
        &["text/yaml", "application/yaml", "application/x-yaml"]
    }

    fn dumps(&self, value: &Value) -> Result<String, ValidationError> {
        Ok(serde_yaml::to_string(value)?)
    }

    fn loads(&self, body: &[u8]) -> Result<Value, ValidationError> {
        Ok(serde_yaml::from_slice(body)?)
    }
}

/// `application/x-www-form-urlencoded` codec.
///
/// Encodes a flat object; arrays become repeated keys. Decoding yields an
/// object of strings, with repeated keys collected into arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormCodec;

fn form_scalar(key: &str, value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) | Value::Object(_) => Err(ValidationError::form(format!(
            "field `{key}` is nested and cannot be form-encoded"
        ))),
    }
}

impl Codec for FormCodec {
    fn key(&self) -> &str {
        "form"
    }

    fn content_types(&self) -> &[&str] {
        &["application/x-www-form-urlencoded"]
    }

    fn dumps(&self, value: &Value) -> Result<String, ValidationError> {
        let Value::Object(fields) = value else {
            return Err(ValidationError::form("only objects can be form-encoded"));
        };

        let mut encoder = form_urlencoded::Serializer::new(String::new());
        for (key, value) in fields {
            match value {
                Value::Array(items) => {
                    for item in items {
                        encoder.append_pair(key, &form_scalar(key, item)?);
                    }
                }
                other => {
                    encoder.append_pair(key, &form_scalar(key, other)?);
                }
            }
        }
        Ok(encoder.finish())
    }

    fn loads(&self, body: &[u8]) -> Result<Value, ValidationError> {
        let mut fields = Map::new();
        for (key, value) in form_urlencoded::parse(body) {
            let value = Value::String(value.into_owned());
            match fields.get_mut(key.as_ref()) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    fields.insert(key.into_owned(), value);
                }
            }
        }
        Ok(Value::Object(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_content_types() {
        for content_type in [
            "application/json",
            "application/x-javascript",
            "text/javascript",
            "text/x-javascript",
            "text/x-json",
        ] {
            assert!(JsonCodec.matches(content_type), "{content_type}");
        }
        assert!(!JsonCodec.matches("text/plain"));
    }

    #[test]
    fn test_json_loads_preserves_order() {
        let value = JsonCodec.loads(br#"{"result": ["a", "b", "c"]}"#).unwrap();
        assert_eq!(value["result"], json!(["a", "b", "c"]));
    }

    #[test]
    fn test_json_invalid() {
        let result = JsonCodec.loads(b"not json");
        assert!(matches!(result, Err(ValidationError::JsonParse(_))));
    }

    #[test]
    fn test_yaml_loads() {
        let value = YamlCodec.loads(b"name: test\nvalue: 42").unwrap();
        assert_eq!(value, json!({"name": "test", "value": 42}));
        assert_eq!(YamlCodec.content_type(), "text/yaml");
    }

    #[test]
    fn test_form_dumps_flat_object() {
        let body = FormCodec
            .dumps(&json!({"name": "a b", "tags": ["x", "y"], "n": 3}))
            .unwrap();
        let mut pairs: Vec<&str> = body.split('&').collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec!["n=3", "name=a+b", "tags=x", "tags=y"]);
    }

    #[test]
    fn test_form_rejects_nested() {
        assert!(FormCodec.dumps(&json!({"a": {"b": 1}})).is_err());
        assert!(FormCodec.dumps(&json!(["a"])).is_err());
    }

    #[test]
    fn test_form_loads_repeated_keys() {
        let value = FormCodec.loads(b"a=1&b=two+words&a=3").unwrap();
        assert_eq!(value, json!({"a": ["1", "3"], "b": "two words"}));
    }

    #[test]
    fn test_media_type_match_ignores_case() {
        assert!(JsonCodec.matches("Application/JSON"));
    }
}
