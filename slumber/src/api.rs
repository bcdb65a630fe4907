//! The API root and its builder.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use crate::auth::{Credentials, Token};
use crate::config::{ResourceConfig, ResponseHook};
use crate::content::Content;
use crate::error::{ApiError, ConfigError};
use crate::resource::Resource;
use crate::serialize::SerializerRegistry;
use crate::session::{HttpSession, Session};

/// The root of an API.
///
/// Every resource reached from the root shares its session, serializer
/// registry and token.
///
/// ## Examples
///
/// ```rust,ignore
/// use slumber::{Api, Credentials};
///
/// let api = Api::builder()
///     .base_url("https://api.example.com/v1/")
///     .credentials(Credentials::basic("user", "secret"))
///     .format("json")
///     .build()?;
///
/// let notes = api.child("notes")?.get(&[("limit", "10")]).await?;
/// ```
pub struct Api<S = HttpSession> {
    root: Resource<S>,
}

impl Api<HttpSession> {
    /// Creates a new builder for configuring an API root.
    pub fn builder() -> ApiBuilder {
        ApiBuilder::new()
    }
}

impl<S> Api<S> {
    /// Returns the root URL.
    pub fn url(&self) -> &str {
        self.root.url()
    }

    /// Returns the root configuration record.
    pub fn config(&self) -> &ResourceConfig<S> {
        self.root.config()
    }

    /// Returns the resource at the root URL itself.
    pub fn resource(&self) -> &Resource<S> {
        &self.root
    }

    /// Returns the top-level resource `name`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::ReservedName`] for names starting with `_`.
    pub fn child(&self, name: impl AsRef<str>) -> Result<Resource<S>, ConfigError> {
        self.root.child(name)
    }

    /// Installs a hook applied to every body returned by resources of this root.
    ///
    /// Resources derived before the call keep their previous hook.
    pub fn with_response_hook<F>(self, hook: F) -> Self
    where
        F: Fn(&Resource<S>, Content) -> Content + Send + Sync + 'static,
    {
        let hook: ResponseHook<S> = Arc::new(hook);
        Self {
            root: Resource::new(self.root.config().with_response_hook(Some(hook))),
        }
    }
}

// Manual Clone implementation - the session is shared, not duplicated
impl<S> Clone for Api<S> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<S> fmt::Debug for Api<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api").field("config", self.config()).finish()
    }
}

/// Builder for an [`Api`] root.
///
/// Only `base_url` is required. Without a session, [`build`](Self::build)
/// creates an [`HttpSession`] carrying the credentials.
#[derive(Debug, Default)]
pub struct ApiBuilder {
    base_url: Option<String>,
    credentials: Option<Credentials>,
    format: Option<String>,
    append_slash: Option<bool>,
    serializers: Option<SerializerRegistry>,
    token: Option<Token>,
}

impl ApiBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the root URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets basic-auth credentials for the created session.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the default format name.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets whether request URLs get a trailing slash. Defaults to `true`.
    pub fn append_slash(mut self, append_slash: bool) -> Self {
        self.append_slash = Some(append_slash);
        self
    }

    /// Replaces the serializer registry.
    ///
    /// Without one, the JSON, YAML and form codecs are registered with the
    /// chosen format as default.
    pub fn serializers(mut self, serializers: SerializerRegistry) -> Self {
        self.serializers = Some(serializers);
        self
    }

    /// Sets the token sent as `Authorization` with every request.
    pub fn token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    /// Builds a root backed by a new [`HttpSession`].
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::MissingField`] without a base URL
    /// - [`ConfigError::InvalidUrl`] if the base URL is not absolute
    /// - [`SerializerError`](crate::error::SerializerError) if the format names no codec
    /// - transport errors from creating the HTTP client
    pub fn build(mut self) -> Result<Api<HttpSession>, ApiError> {
        let base_url = self.validated_base_url()?;
        let session = HttpSession::new(self.credentials.take())?;
        self.finish(base_url, Arc::new(session))
    }

    /// Builds a root that sends through `session`.
    ///
    /// Credentials are not applied to a supplied session.
    ///
    /// ## Errors
    ///
    /// Same as [`build`](Self::build), minus client construction.
    pub fn build_with_session<S: Session>(self, session: S) -> Result<Api<S>, ApiError> {
        let base_url = self.validated_base_url()?;
        if self.credentials.is_some() {
            warn!("Credentials are ignored when a session is supplied");
        }
        self.finish(base_url, Arc::new(session))
    }

    fn validated_base_url(&self) -> Result<String, ConfigError> {
        let base_url = self
            .base_url
            .clone()
            .ok_or_else(|| ConfigError::missing_field("base_url"))?;
        Url::parse(&base_url)?;
        Ok(base_url)
    }

    fn finish<S>(self, base_url: String, session: Arc<S>) -> Result<Api<S>, ApiError> {
        let serializers = match self.serializers {
            Some(registry) => registry,
            None => {
                let registry = SerializerRegistry::with_defaults();
                match &self.format {
                    Some(format) => registry.with_default(format.clone()),
                    None => registry,
                }
            }
        };

        let mut config = ResourceConfig::new(base_url, session, Arc::new(serializers))
            .with_append_slash(self.append_slash.unwrap_or(true))
            .with_token(self.token);
        if let Some(format) = self.format {
            config = config.with_format(format);
        }

        let codec = config.codec()?;
        debug!(
            base_url = config.base_url(),
            codec = codec.key(),
            append_slash = config.append_slash(),
            "Built API root"
        );

        Ok(Api {
            root: Resource::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientError, SerializerError};
    use crate::session::{HttpRequest, HttpResponse};

    struct NullSession;

    impl Session for NullSession {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, ClientError> {
            Err(ClientError::Connection("offline".to_string()))
        }
    }

    #[test]
    fn test_missing_base_url() {
        let err = Api::builder().build_with_session(NullSession).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Config(ConfigError::MissingField { field: "base_url" })
        ));
    }

    #[test]
    fn test_relative_base_url() {
        let err = Api::builder()
            .base_url("/api/v1")
            .build_with_session(NullSession)
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_defaults() {
        let api = Api::builder()
            .base_url("http://example/api/v1/")
            .build_with_session(NullSession)
            .unwrap();

        assert_eq!(api.url(), "http://example/api/v1/");
        assert_eq!(api.config().format(), "json");
        assert!(api.config().append_slash());
        assert!(api.config().token().is_none());
        assert!(api.config().response_hook().is_none());
    }

    #[test]
    fn test_format_selects_default_codec() {
        let api = Api::builder()
            .base_url("http://example/api/v1/")
            .format("yaml")
            .build_with_session(NullSession)
            .unwrap();

        assert_eq!(api.config().format(), "yaml");
        assert_eq!(api.config().codec().unwrap().content_type(), "text/yaml");
        assert_eq!(api.config().serializers().default_name(), Some("yaml"));
    }

    #[test]
    fn test_unknown_format() {
        let err = Api::builder()
            .base_url("http://example/api/v1/")
            .format("msgpack")
            .build_with_session(NullSession)
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Serializer(SerializerError::NotAvailable { .. })
        ));
    }

    #[test]
    fn test_empty_registry() {
        let err = Api::builder()
            .base_url("http://example/api/v1/")
            .serializers(SerializerRegistry::empty())
            .build_with_session(NullSession)
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Serializer(SerializerError::NoneAvailable)
        ));
    }

    #[test]
    fn test_children_share_session() {
        let api = Api::builder()
            .base_url("http://example/api/v1")
            .append_slash(false)
            .token(Token::bearer("abc"))
            .build_with_session(NullSession)
            .unwrap();

        let notes = api.child("notes").unwrap();
        let note = notes.with_id(3);
        assert_eq!(note.url(), "http://example/api/v1/notes/3");
        assert!(!note.config().append_slash());
        assert_eq!(note.config().token(), Some(&Token::bearer("abc")));
        assert!(Arc::ptr_eq(api.config().session(), note.config().session()));
    }

    #[test]
    fn test_reserved_child() {
        let api = Api::builder()
            .base_url("http://example/api/v1")
            .build_with_session(NullSession)
            .unwrap();
        assert!(matches!(
            api.child("_session"),
            Err(ConfigError::ReservedName { .. })
        ));
    }

    #[test]
    fn test_response_hook_reaches_children() {
        let api = Api::builder()
            .base_url("http://example/api/v1")
            .build_with_session(NullSession)
            .unwrap()
            .with_response_hook(|_resource: &Resource<NullSession>, content| content);

        let child = api.child("notes").unwrap();
        assert!(child.config().response_hook().is_some());
    }

    #[test]
    fn test_build_creates_http_session() {
        let api = Api::builder()
            .base_url("https://api.example.com/v1/")
            .credentials(Credentials::basic("user", "secret"))
            .build()
            .unwrap();
        assert_eq!(
            api.config().session().timeout(),
            std::time::Duration::from_secs(30)
        );
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_credentials_with_session_warns() {
        Api::builder()
            .base_url("http://example/api/v1")
            .credentials(Credentials::basic("user", "secret"))
            .build_with_session(NullSession)
            .unwrap();
        assert!(logs_contain("Credentials are ignored"));
    }
}
