//! Ordered codec registry.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::{Codec, FormCodec, JsonCodec, YamlCodec};
use crate::error::{ApiError, SerializerError};

/// An ordered set of codecs with a designated default.
///
/// Lookups by media type return the first registered codec claiming it.
/// The default codec is the one named by [`with_default`](Self::with_default),
/// or the first registered codec when no name was given.
///
/// ## Examples
///
/// ```rust
/// use slumber::SerializerRegistry;
///
/// let registry = SerializerRegistry::with_defaults().with_default("yaml");
/// assert_eq!(registry.content_type().unwrap(), "text/yaml");
/// assert_eq!(registry.by_content_type("text/javascript").unwrap().key(), "json");
/// assert!(registry.by_content_type("text/plain").is_err());
/// ```
#[derive(Clone)]
pub struct SerializerRegistry {
    codecs: Vec<Arc<dyn Codec>>,
    default: Option<String>,
}

impl SerializerRegistry {
    /// Creates a registry with no codecs.
    pub fn empty() -> Self {
        Self {
            codecs: Vec::new(),
            default: None,
        }
    }

    /// Creates a registry holding the JSON, YAML and form codecs, in that order.
    pub fn with_defaults() -> Self {
        Self::empty()
            .register(JsonCodec)
            .register(YamlCodec)
            .register(FormCodec)
    }

    /// Appends a codec. Earlier codecs win media-type lookups.
    pub fn register(mut self, codec: impl Codec + 'static) -> Self {
        self.codecs.push(Arc::new(codec));
        self
    }

    /// Names the default codec.
    pub fn with_default(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Returns the configured default name, if any.
    pub fn default_name(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Returns `true` if no codec is registered.
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Iterates over the codecs in registration order.
    pub fn codecs(&self) -> impl Iterator<Item = &dyn Codec> {
        self.codecs.iter().map(|codec| codec.as_ref())
    }

    fn ensure_any(&self) -> Result<(), SerializerError> {
        if self.codecs.is_empty() {
            Err(SerializerError::NoneAvailable)
        } else {
            Ok(())
        }
    }

    /// Returns the default codec.
    ///
    /// ## Errors
    ///
    /// [`SerializerError::NoneAvailable`] for an empty registry, or
    /// [`SerializerError::NotAvailable`] if the default name is unknown.
    pub fn default_codec(&self) -> Result<&dyn Codec, SerializerError> {
        match &self.default {
            Some(name) => self.by_name(name),
            None => {
                self.ensure_any()?;
                self.codecs().next().ok_or(SerializerError::NoneAvailable)
            }
        }
    }

    /// Looks up a codec by registry name.
    pub fn by_name(&self, name: &str) -> Result<&dyn Codec, SerializerError> {
        self.ensure_any()?;
        self.codecs()
            .find(|codec| codec.key() == name)
            .ok_or_else(|| SerializerError::not_available(name))
    }

    /// Looks up the first codec claiming `media_type`.
    pub fn by_content_type(&self, media_type: &str) -> Result<&dyn Codec, SerializerError> {
        self.ensure_any()?;
        self.codecs()
            .find(|codec| codec.matches(media_type))
            .ok_or_else(|| SerializerError::not_available(media_type))
    }

    /// Resolves `name` if given, else the default codec.
    pub fn resolve(&self, name: Option<&str>) -> Result<&dyn Codec, SerializerError> {
        match name {
            Some(name) => self.by_name(name),
            None => self.default_codec(),
        }
    }

    /// Media type of the default codec.
    pub fn content_type(&self) -> Result<&str, SerializerError> {
        Ok(self.default_codec()?.content_type())
    }

    /// Encodes with the default codec.
    pub fn dumps(&self, value: &Value) -> Result<String, ApiError> {
        Ok(self.default_codec()?.dumps(value)?)
    }

    /// Decodes with the default codec.
    pub fn loads(&self, body: &[u8]) -> Result<Value, ApiError> {
        Ok(self.default_codec()?.loads(body)?)
    }
}

impl Default for SerializerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerRegistry")
            .field("codecs", &self.codecs().map(|c| c.key()).collect::<Vec<_>>())
            .field("default", &self.default)
            .finish()
    }
}
