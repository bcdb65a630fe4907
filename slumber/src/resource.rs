//! Resources and their verbs.
//!
//! A [`Resource`] is one addressable endpoint. Navigation methods
//! ([`child`](Resource::child), [`with_id`](Resource::with_id),
//! [`call`](Resource::call)) derive new resources with a longer URL; verbs
//! ([`get`](Resource::get), [`post`](Resource::post), ...) perform exactly one
//! exchange through the shared [`Session`].
//!
//! ## Status handling
//!
//! Every verb goes through [`Resource::request`], which turns 4xx and 5xx
//! into [`HttpError`] before the verb sees the status. The `None`/`false`
//! results of the verbs are therefore only produced for statuses outside
//! both 200-299 and 400-599 (1xx, 3xx the session did not follow, 600+).
//! Those are logged at `warn` level.

use std::fmt::{self, Display};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn, Span};
use url::Url;

use crate::config::ResourceConfig;
use crate::content::Content;
use crate::error::{ApiError, ConfigError, HttpError, ValidationError};
use crate::method::RestMethod;
use crate::path::{ensure_trailing_slash, url_join};
use crate::session::{
    HttpRequest, HttpResponse, HttpSession, MultipartForm, RequestBody, Session,
};

/// Names starting with this prefix never address a child resource.
pub const RESERVED_PREFIX: &str = "_";

/// What a body-carrying verb sends.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// A value encoded by the resource's codec.
    Data(Value),
    /// A multipart upload, sent without codec encoding.
    Files(MultipartForm),
}

impl Body {
    /// Creates a [`Body::Data`] from any serializable value.
    ///
    /// ## Errors
    ///
    /// Returns an error if `value` cannot be represented as JSON data.
    pub fn data<T: Serialize + ?Sized>(value: &T) -> Result<Self, ValidationError> {
        Ok(Self::Data(serde_json::to_value(value)?))
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Self::Data(value)
    }
}

impl From<MultipartForm> for Body {
    fn from(form: MultipartForm) -> Self {
        Self::Files(form)
    }
}

/// Changes applied by [`Resource::call`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    id: Option<String>,
    format: Option<String>,
    url_override: Option<String>,
}

impl CallOptions {
    /// Creates empty options; calling with them returns the same resource.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` as a path segment.
    pub fn id(mut self, id: impl Display) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Replaces the format.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Replaces the whole URL. Applied after `id`.
    pub fn url_override(mut self, url: impl Into<String>) -> Self {
        self.url_override = Some(url.into());
        self
    }

    /// Returns `true` if no option is set.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.format.is_none() && self.url_override.is_none()
    }
}

/// One HTTP-addressable resource.
///
/// ## Examples
///
/// ```rust,ignore
/// use slumber::{Api, Body};
/// use serde_json::json;
///
/// let api = Api::builder().base_url("https://api.example.com/v1/").build()?;
///
/// // GET https://api.example.com/v1/users/42/
/// let user = api.child("users")?.with_id(42).get(&[]).await?;
///
/// // POST https://api.example.com/v1/users/?notify=true
/// let created = api
///     .child("users")?
///     .post(json!({"name": "alice"}), &[("notify", "true")])
///     .await?;
/// ```
pub struct Resource<S = HttpSession> {
    config: ResourceConfig<S>,
}

impl<S> Resource<S> {
    /// Wraps a configuration record.
    pub fn new(config: ResourceConfig<S>) -> Self {
        Self { config }
    }

    /// Returns the configuration record.
    pub fn config(&self) -> &ResourceConfig<S> {
        &self.config
    }

    /// Returns the resource URL.
    pub fn url(&self) -> &str {
        self.config.base_url()
    }

    /// Returns the format name.
    pub fn format(&self) -> &str {
        self.config.format()
    }

    /// Returns the child resource `name` below this one.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::ReservedName`] for names starting with `_`.
    pub fn child(&self, name: impl AsRef<str>) -> Result<Self, ConfigError> {
        let name = name.as_ref();
        if name.starts_with(RESERVED_PREFIX) {
            return Err(ConfigError::ReservedName {
                name: name.to_string(),
            });
        }
        Ok(Self::new(
            self.config.with_base_url(url_join(self.url(), &[name])),
        ))
    }

    /// Returns the resource identified by `id` below this one.
    pub fn with_id(&self, id: impl Display) -> Self {
        self.call(CallOptions::new().id(id))
    }

    /// Returns this resource with a different format.
    pub fn with_format(&self, format: impl Into<String>) -> Self {
        self.call(CallOptions::new().format(format))
    }

    /// Returns this resource's settings bound to a different URL.
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        self.call(CallOptions::new().url_override(url))
    }

    /// Derives a resource from `options`.
    ///
    /// Empty options return a resource identical to this one.
    pub fn call(&self, options: CallOptions) -> Self {
        if options.is_empty() {
            return self.clone();
        }

        let mut config = self.config.clone();
        if let Some(id) = options.id {
            config = config.with_base_url(url_join(config.base_url(), &[id]));
        }
        if let Some(format) = options.format {
            config = config.with_format(format);
        }
        if let Some(url) = options.url_override {
            config = config.with_base_url(url);
        }
        Self::new(config)
    }

    /// Decodes a response body and applies the response hook.
    ///
    /// The body is decoded by the first codec claiming the response's media
    /// type. Without a `content-type`, with an unclaimed media type, or with
    /// an empty body, the raw bytes are returned.
    ///
    /// ## Errors
    ///
    /// Returns an error if a claiming codec fails to decode the body.
    pub fn decode(&self, response: &HttpResponse) -> Result<Content, ApiError> {
        let content = self.decode_body(response)?;
        Ok(match self.config.response_hook() {
            Some(hook) => hook(self, content),
            None => content,
        })
    }

    fn decode_body(&self, response: &HttpResponse) -> Result<Content, ValidationError> {
        if response.body.is_empty() {
            return Ok(Content::Raw(response.body.clone()));
        }
        let Some(media_type) = response.media_type() else {
            return Ok(Content::Raw(response.body.clone()));
        };

        match self.config.serializers().by_content_type(media_type) {
            Ok(codec) => {
                debug!(media_type, codec = codec.key(), "Decoding response body");
                Ok(Content::Decoded(codec.loads(&response.body)?))
            }
            Err(e) => {
                debug!(media_type, error = %e, "Returning raw response body");
                Ok(Content::Raw(response.body.clone()))
            }
        }
    }

    fn prepare(
        &self,
        method: RestMethod,
        body: Body,
        params: &[(&str, &str)],
    ) -> Result<HttpRequest, ApiError> {
        let codec = self.config.codec()?;
        let media_type = HeaderValue::try_from(codec.content_type())
            .map_err(|e| ConfigError::invalid_header(format!("invalid media type: {e}")))?;

        let url = if self.config.append_slash() {
            ensure_trailing_slash(self.url())
        } else {
            self.url().to_string()
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, media_type.clone());

        if let Some(token) = self.config.token() {
            headers.insert(AUTHORIZATION, token.header_value()?);
        }

        let body = match body {
            Body::Files(form) => RequestBody::Multipart(form),
            Body::Data(value) => {
                headers.insert(CONTENT_TYPE, media_type);
                RequestBody::Encoded(codec.dumps(&value)?)
            }
            Body::Empty => {
                headers.insert(CONTENT_TYPE, media_type);
                RequestBody::Empty
            }
        };

        Ok(HttpRequest {
            method,
            url,
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers,
            body,
        })
    }
}

impl<S: Session> Resource<S> {
    /// Performs one exchange and returns the undecoded response.
    ///
    /// Sets `accept` to the active codec's media type, and `content-type`
    /// too unless the body is multipart. Appends a trailing slash when
    /// configured and attaches the token as `Authorization`.
    ///
    /// ## Errors
    ///
    /// - [`HttpError::Client`] for 400-499 and [`HttpError::Server`] for 500-599
    /// - [`SerializerError`](crate::error::SerializerError) if the format names no codec
    /// - transport and encoding errors
    #[instrument(
        name = "api_request",
        skip(self, method, body, params),
        fields(
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn request(
        &self,
        method: RestMethod,
        body: Body,
        params: &[(&str, &str)],
    ) -> Result<HttpResponse, ApiError> {
        Span::current().record("http.method", method.to_string().as_str());

        let request = self.prepare(method, body, params)?;
        Span::current().record("http.url", request.url.as_str());

        let response = self.config.session().send(request).await?;
        Span::current().record("http.status_code", response.status);

        let otel_status = match response.status {
            500..=599 => "ERROR",
            400..=499 => "UNSET",
            _ => "OK",
        };
        Span::current().record("otel.status_code", otel_status);

        Ok(HttpError::from_response(response)?)
    }

    /// GET with `params` as the query string.
    ///
    /// Returns `None` for statuses outside 2xx that are not errors.
    pub async fn get(&self, params: &[(&str, &str)]) -> Result<Option<Content>, ApiError> {
        self.exchange(RestMethod::Get, Body::Empty, params).await
    }

    /// POST `body`.
    ///
    /// Returns `None` for statuses outside 2xx that are not errors.
    pub async fn post(
        &self,
        body: impl Into<Body>,
        params: &[(&str, &str)],
    ) -> Result<Option<Content>, ApiError> {
        self.exchange(RestMethod::Post, body.into(), params).await
    }

    /// PUT `body`.
    ///
    /// Returns `None` for statuses outside 2xx that are not errors.
    pub async fn put(
        &self,
        body: impl Into<Body>,
        params: &[(&str, &str)],
    ) -> Result<Option<Content>, ApiError> {
        self.exchange(RestMethod::Put, body.into(), params).await
    }

    /// PATCH `body`.
    ///
    /// Returns `None` for statuses outside 2xx that are not errors.
    pub async fn patch(
        &self,
        body: impl Into<Body>,
        params: &[(&str, &str)],
    ) -> Result<Option<Content>, ApiError> {
        self.exchange(RestMethod::Patch, body.into(), params).await
    }

    /// DELETE this resource.
    ///
    /// Returns `true` for any 2xx, 204 included, and `false` for statuses
    /// outside 2xx that are not errors.
    pub async fn delete(&self, params: &[(&str, &str)]) -> Result<bool, ApiError> {
        let response = self.request(RestMethod::Delete, Body::Empty, params).await?;
        if response.is_success() {
            Ok(true)
        } else {
            warn_stray_status(&response);
            Ok(false)
        }
    }

    /// GETs the resource named by `response`'s `Location` header.
    ///
    /// For creating requests that answer with a location instead of a body.
    /// Relative locations are resolved against the response URL.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let users = api.child("users")?;
    /// let created = users.request(RestMethod::Post, json!({"name": "bob"}).into(), &[]).await?;
    /// let user = users.follow_location(&created, &[]).await?;
    /// ```
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingField`] if there is no `Location` header.
    pub async fn follow_location(
        &self,
        response: &HttpResponse,
        params: &[(&str, &str)],
    ) -> Result<Option<Content>, ApiError> {
        let location = response
            .location()
            .ok_or_else(|| ConfigError::missing_field("location"))?;
        let target = Url::parse(&response.url)
            .and_then(|base| base.join(location))
            .map_err(ConfigError::from)?;
        self.with_url(target).get(params).await
    }

    async fn exchange(
        &self,
        method: RestMethod,
        body: Body,
        params: &[(&str, &str)],
    ) -> Result<Option<Content>, ApiError> {
        let response = self.request(method, body, params).await?;
        if response.is_success() {
            Ok(Some(self.decode(&response)?))
        } else {
            warn_stray_status(&response);
            Ok(None)
        }
    }
}

fn warn_stray_status(response: &HttpResponse) {
    warn!(
        http.status_code = response.status,
        url = %response.url,
        "Unexpected status outside 2xx and 4xx/5xx, returning no content"
    );
}

// Manual Clone implementation - S is shared behind the config's Arc
impl<S> Clone for Resource<S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
        }
    }
}

impl<S> fmt::Debug for Resource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("url", &self.url())
            .field("format", &self.format())
            .finish()
    }
}
