//! `reqwest`-backed session.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use tracing::debug;

use super::{HttpRequest, HttpResponse, MultipartForm, RequestBody, Session};
use crate::auth::Credentials;
use crate::error::{ApiError, ClientError, ConfigError};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Builder for configuring an [`HttpSession`].
#[derive(Debug)]
pub struct HttpSessionBuilder {
    timeout: Duration,
    default_headers: HeaderMap,
    credentials: Option<Credentials>,
}

impl HttpSessionBuilder {
    fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
            credentials: None,
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a default header to all requests.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets basic-auth credentials sent with every request.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Builds the [`HttpSession`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<HttpSession, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(ClientError::Request)?;

        Ok(HttpSession {
            client,
            timeout: self.timeout,
            credentials: self.credentials,
        })
    }
}

/// Session that performs exchanges with a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: reqwest::Client,
    timeout: Duration,
    credentials: Option<Credentials>,
}

impl HttpSession {
    /// Creates a new builder for configuring a session.
    pub fn builder() -> HttpSessionBuilder {
        HttpSessionBuilder::new()
    }

    /// Creates a session with default settings and optional basic auth.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(credentials: Option<Credentials>) -> Result<Self, ApiError> {
        let builder = Self::builder();
        match credentials {
            Some(credentials) => builder.credentials(credentials).build(),
            None => builder.build(),
        }
    }

    /// Returns the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn transport_error(&self, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout {
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else {
            ClientError::Request(error)
        }
    }
}

fn multipart(form: MultipartForm) -> Result<Form, ClientError> {
    let mut multipart = Form::new();
    for (name, value) in form.fields {
        multipart = multipart.text(name, value);
    }
    for file in form.files {
        let mut part = Part::bytes(file.bytes.to_vec());
        if let Some(file_name) = file.file_name {
            part = part.file_name(file_name);
        }
        if let Some(content_type) = file.content_type {
            part = part
                .mime_str(&content_type)
                .map_err(ClientError::Request)?;
        }
        multipart = multipart.part(file.field, part);
    }
    Ok(multipart)
}

impl Session for HttpSession {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let mut builder = self
            .client
            .request(request.method.to_reqwest(), request.url.as_str())
            .headers(request.headers);

        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }

        if let Some(credentials) = &self.credentials {
            builder = builder.basic_auth(&credentials.username, credentials.password.as_deref());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Encoded(body) => builder.body(body),
            RequestBody::Multipart(form) => builder.multipart(multipart(form)?),
        };

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        debug!(http.status_code = status.as_u16(), body_len = body.len(), "Received HTTP response");

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            url,
            headers,
            body,
        })
    }
}
