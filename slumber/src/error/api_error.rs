//! Top-level error type.

use super::{
    AuthError, ClientError, ConfigError, HttpError, SerializerError, ValidationError,
};
use thiserror::Error;

/// Top-level error type for all slumber operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust,ignore
/// use slumber::error::{ApiError, HttpError};
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Http(HttpError::Client(f)) => eprintln!("rejected: {}", f.status()),
///         ApiError::Http(HttpError::Server(f)) => eprintln!("server failed: {}", f.status()),
///         ApiError::Client(e) => eprintln!("Network error: {e}"),
///         other => eprintln!("{other}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a 4xx or 5xx status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Transport errors (network, timeout, connection failures).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Body encoding or decoding errors.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No usable serializer.
    #[error(transparent)]
    Serializer(#[from] SerializerError),

    /// Credentials that cannot be rendered as headers.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Root or resource configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => Some(e.failure().status()),
            Self::Client(e) => e.status_code(),
            _ => None,
        }
    }
}
