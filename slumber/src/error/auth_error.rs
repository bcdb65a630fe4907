//! Authentication errors.

use thiserror::Error;

/// Errors related to the credentials attached to requests.
///
/// slumber never negotiates credentials itself; these errors only occur
/// when a configured token or password cannot be sent as a header.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token renders to an invalid `Authorization` header value.
    #[error("Invalid token format")]
    InvalidTokenFormat,

    /// The token has no access token.
    #[error("Missing access token for token type {token_type}")]
    MissingAccessToken {
        /// The declared token type (e.g. `Bearer`).
        token_type: String,
    },
}
