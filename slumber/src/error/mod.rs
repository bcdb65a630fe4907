//! Layered error types for the slumber crate.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ApiError`] - Top-level error type for all operations
//! - [`HttpError`] - The server answered with a 4xx or 5xx status
//! - [`ClientError`] - Transport and network errors
//! - [`ConfigError`] - Root and resource configuration errors
//! - [`SerializerError`] - Codec lookup errors
//! - [`ValidationError`] - Body encoding and decoding errors
//! - [`AuthError`] - Credentials that cannot be sent on the wire

mod api_error;
mod auth_error;
mod client_error;
mod config_error;
mod http_error;
mod serializer_error;
mod validation_error;

pub use api_error::ApiError;
pub use auth_error::AuthError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use http_error::{HttpError, HttpFailure};
pub use serializer_error::SerializerError;
pub use validation_error::ValidationError;
