//! Error statuses returned by the server.

use std::fmt;

use thiserror::Error;

use crate::session::HttpResponse;

/// The server answered, but with an error status.
///
/// Raised for every verb before the verb looks at the status itself, so a
/// 4xx or 5xx never reaches the caller as a decoded body.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server reported a client error (4xx).
    #[error("Client Error {0}")]
    Client(HttpFailure),

    /// The server reported a server error (5xx).
    #[error("Server Error {0}")]
    Server(HttpFailure),
}

impl HttpError {
    /// Classifies a response by status.
    ///
    /// Anything outside 400-599 is handed back unchanged.
    pub fn from_response(response: HttpResponse) -> Result<HttpResponse, Self> {
        match response.status {
            400..=499 => Err(Self::Client(HttpFailure::new(response))),
            500..=599 => Err(Self::Server(HttpFailure::new(response))),
            _ => Ok(response),
        }
    }

    /// Returns the failure details.
    pub fn failure(&self) -> &HttpFailure {
        match self {
            Self::Client(f) | Self::Server(f) => f,
        }
    }

    /// Consumes the error and returns the offending response.
    pub fn into_response(self) -> HttpResponse {
        match self {
            Self::Client(f) | Self::Server(f) => *f.response,
        }
    }

    /// Returns `true` for 4xx statuses.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Client(_))
    }

    /// Returns `true` for 5xx statuses.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Server(_))
    }
}

/// The response that caused an [`HttpError`].
#[derive(Debug)]
pub struct HttpFailure {
    response: Box<HttpResponse>,
}

impl HttpFailure {
    fn new(response: HttpResponse) -> Self {
        Self {
            response: Box::new(response),
        }
    }

    /// Returns the status code.
    pub fn status(&self) -> u16 {
        self.response.status
    }

    /// Returns the reason phrase.
    pub fn reason(&self) -> &str {
        &self.response.reason
    }

    /// Returns the full offending response.
    pub fn response(&self) -> &HttpResponse {
        &self.response
    }

    /// Returns the response body as lossy UTF-8.
    pub fn text(&self) -> String {
        self.response.text()
    }
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}, text: {}",
            self.response.status,
            self.response.reason,
            self.response.url,
            self.response.text()
        )
    }
}
