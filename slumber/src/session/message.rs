//! Transport-neutral request and response messages.

use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE, LOCATION};

use crate::method::RestMethod;

/// One outgoing HTTP request, fully prepared by a resource.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: RestMethod,
    /// Absolute request URL, without the query parameters below.
    pub url: String,
    /// Query parameters, appended in order.
    pub params: Vec<(String, String)>,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body.
    pub body: RequestBody,
}

/// The body of an [`HttpRequest`].
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// A body already encoded by a codec.
    Encoded(String),
    /// A multipart form, passed to the transport untouched.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Returns `true` if there is no body.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A multipart upload: plain text fields plus file parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    /// Text fields, sent as-is.
    pub fields: Vec<(String, String)>,
    /// File parts.
    pub files: Vec<FilePart>,
}

impl MultipartForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Adds a file part.
    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }
}

/// A single file in a [`MultipartForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name.
    pub field: String,
    /// File name reported to the server.
    pub file_name: Option<String>,
    /// Media type of the part.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Bytes,
}

impl FilePart {
    /// Creates a file part for `field` holding `bytes`.
    pub fn new(field: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            field: field.into(),
            file_name: None,
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Sets the file name.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Sets the part's media type.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Reason phrase (empty if unknown).
    pub reason: String,
    /// Final URL of the exchange.
    pub url: String,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Returns `true` for 200-299.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Returns the body as lossy UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns the media type of the `content-type` header, parameters stripped.
    ///
    /// `"application/json; charset=utf-8"` yields `"application/json"`.
    pub fn media_type(&self) -> Option<&str> {
        let value = self.headers.get(CONTENT_TYPE)?.to_str().ok()?;
        let media_type = value.split(';').next().unwrap_or_default().trim();
        (!media_type.is_empty()).then_some(media_type)
    }

    /// Returns the `Location` header, if present.
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION)?.to_str().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn response_with(content_type: &'static str) -> HttpResponse {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        HttpResponse {
            status: 200,
            reason: "OK".to_string(),
            url: "http://example/".to_string(),
            headers,
            body: Bytes::new(),
        }
    }

    #[test]
    fn test_media_type_strips_parameters() {
        let response = response_with("application/json; charset=utf-8");
        assert_eq!(response.media_type(), Some("application/json"));
    }

    #[test]
    fn test_media_type_trims() {
        let response = response_with("  text/plain  ");
        assert_eq!(response.media_type(), Some("text/plain"));
    }

    #[test]
    fn test_missing_media_type() {
        let mut response = response_with("text/plain");
        response.headers.clear();
        assert_eq!(response.media_type(), None);
        assert_eq!(response.location(), None);
    }

    #[test]
    fn test_multipart_builder() {
        let form = MultipartForm::new()
            .text("title", "report")
            .file(FilePart::new("upload", &b"abc"[..]).file_name("a.txt"));
        assert_eq!(form.fields, vec![("title".to_string(), "report".to_string())]);
        assert_eq!(form.files[0].file_name.as_deref(), Some("a.txt"));
        assert_eq!(form.files[0].bytes, Bytes::from_static(b"abc"));
    }
}
