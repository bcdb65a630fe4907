//! The configuration record threaded through every resource.

use std::fmt;
use std::sync::Arc;

use crate::auth::Token;
use crate::content::Content;
use crate::error::SerializerError;
use crate::resource::Resource;
use crate::serialize::{Codec, SerializerRegistry};

/// Format reported when none was set and the registry has no usable default.
pub const DEFAULT_FORMAT: &str = "json";

/// Post-processes every body a verb returns.
///
/// Receives the resource that made the request and the decoded (or raw)
/// body, and returns what the caller will see.
pub type ResponseHook<S> = Arc<dyn Fn(&Resource<S>, Content) -> Content + Send + Sync>;

/// Immutable settings of one resource.
///
/// Deriving a resource clones the record and changes one field; siblings and
/// the parent are never affected. The session and the serializer registry
/// are shared handles.
pub struct ResourceConfig<S> {
    base_url: String,
    format: Option<String>,
    append_slash: bool,
    session: Arc<S>,
    serializers: Arc<SerializerRegistry>,
    token: Option<Token>,
    response_hook: Option<ResponseHook<S>>,
}

impl<S> ResourceConfig<S> {
    /// Creates a record with no format override, no token and no hook.
    /// Trailing slashes are appended.
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<S>,
        serializers: Arc<SerializerRegistry>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            format: None,
            append_slash: true,
            session,
            serializers,
            token: None,
            response_hook: None,
        }
    }

    /// The resource URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The format name.
    ///
    /// This is the explicitly set format, else the registry's default name,
    /// else the key of its first codec, else [`DEFAULT_FORMAT`]. It names
    /// the codec [`codec`](Self::codec) resolves to.
    pub fn format(&self) -> &str {
        match &self.format {
            Some(format) => format,
            None => self
                .serializers
                .default_name()
                .or_else(|| self.serializers.default_codec().ok().map(|codec| codec.key()))
                .unwrap_or(DEFAULT_FORMAT),
        }
    }

    /// The explicitly set format name, if any.
    pub fn format_override(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Whether request URLs get a trailing slash.
    pub fn append_slash(&self) -> bool {
        self.append_slash
    }

    /// The shared session.
    pub fn session(&self) -> &Arc<S> {
        &self.session
    }

    /// The shared serializer registry.
    pub fn serializers(&self) -> &SerializerRegistry {
        &self.serializers
    }

    /// The token sent as `Authorization`, if any.
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// The response hook, if any.
    pub fn response_hook(&self) -> Option<&ResponseHook<S>> {
        self.response_hook.as_ref()
    }

    /// The codec used for request bodies and the `accept` header.
    ///
    /// This is the codec named by the format when one was set, else the
    /// registry's default.
    pub fn codec(&self) -> Result<&dyn Codec, SerializerError> {
        self.serializers.resolve(self.format.as_deref())
    }

    /// Derives a record with a different URL.
    pub fn with_base_url(&self, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..self.clone()
        }
    }

    /// Derives a record with a different format.
    pub fn with_format(&self, format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
            ..self.clone()
        }
    }

    /// Derives a record with a different trailing-slash setting.
    pub fn with_append_slash(&self, append_slash: bool) -> Self {
        Self {
            append_slash,
            ..self.clone()
        }
    }

    /// Derives a record with a different token.
    pub fn with_token(&self, token: Option<Token>) -> Self {
        Self {
            token,
            ..self.clone()
        }
    }

    /// Derives a record with a different response hook.
    pub fn with_response_hook(&self, response_hook: Option<ResponseHook<S>>) -> Self {
        Self {
            response_hook,
            ..self.clone()
        }
    }
}

// Manual Clone implementation - S is behind an Arc and need not be Clone
impl<S> Clone for ResourceConfig<S> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            format: self.format.clone(),
            append_slash: self.append_slash,
            session: Arc::clone(&self.session),
            serializers: Arc::clone(&self.serializers),
            token: self.token.clone(),
            response_hook: self.response_hook.clone(),
        }
    }
}

impl<S> fmt::Debug for ResourceConfig<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceConfig")
            .field("base_url", &self.base_url)
            .field("format", &self.format())
            .field("append_slash", &self.append_slash)
            .field("serializers", &self.serializers)
            .field("token", &self.token)
            .field("response_hook", &self.response_hook.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ResourceConfig<()> {
        ResourceConfig::new(
            "http://example/api/v1/test",
            Arc::new(()),
            Arc::new(SerializerRegistry::with_defaults()),
        )
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert_eq!(config.format(), "json");
        assert_eq!(config.format_override(), None);
        assert!(config.append_slash());
        assert!(config.token().is_none());
        assert_eq!(config.codec().unwrap().key(), "json");
    }

    #[test]
    fn test_derivation_leaves_parent_untouched() {
        let parent = config();
        let child = parent.with_base_url("http://example/api/v1/test/1");
        let yaml = parent.with_format("yaml");

        assert_eq!(parent.base_url(), "http://example/api/v1/test");
        assert_eq!(parent.format(), "json");
        assert_eq!(child.base_url(), "http://example/api/v1/test/1");
        assert_eq!(yaml.format(), "yaml");
        assert_eq!(yaml.codec().unwrap().content_type(), "text/yaml");
        assert!(Arc::ptr_eq(parent.session(), child.session()));
    }

    #[test]
    fn test_format_follows_registry_default() {
        let config = ResourceConfig::new(
            "http://example/api/v1/test",
            Arc::new(()),
            Arc::new(SerializerRegistry::with_defaults().with_default("yaml")),
        );
        assert_eq!(config.format_override(), None);
        assert_eq!(config.format(), "yaml");
        assert_eq!(config.codec().unwrap().key(), config.format());

        let first_registered = ResourceConfig::new(
            "http://example/api/v1/test",
            Arc::new(()),
            Arc::new(SerializerRegistry::empty().register(crate::serialize::FormCodec)),
        );
        assert_eq!(first_registered.format(), "form");

        let empty = ResourceConfig::new(
            "http://example/api/v1/test",
            Arc::new(()),
            Arc::new(SerializerRegistry::empty()),
        );
        assert_eq!(empty.format(), DEFAULT_FORMAT);
    }

    #[test]
    fn test_unknown_format() {
        let config = config().with_format("msgpack");
        assert_eq!(
            config.codec().unwrap_err(),
            SerializerError::not_available("msgpack")
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = config().with_token(Some(Token::bearer("s3cr3t")));
        let debug = format!("{config:?}");
        assert!(debug.contains("http://example/api/v1/test"));
        assert!(!debug.contains("s3cr3t"));
    }
}
