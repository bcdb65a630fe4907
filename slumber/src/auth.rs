//! Credentials attached to outgoing requests.
//!
//! slumber does not negotiate credentials. It sends what it is given: a
//! [`Token`] as an `Authorization` header on every request made through a
//! resource, or basic-auth [`Credentials`] through the session the root
//! creates for itself.

use std::fmt;

use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// A pre-obtained access token.
///
/// The field names match an OAuth 2 token response, so the response of a
/// token endpoint can be deserialized straight into a `Token`.
///
/// ## Examples
///
/// ```rust
/// use slumber::Token;
///
/// let token = Token::bearer("abc123");
/// assert_eq!(token.authorization(), "Bearer abc123");
///
/// let token: Token = serde_json::from_str(
///     r#"{"token_type": "Bearer", "access_token": "xyz", "expires_in": 3600}"#,
/// ).unwrap();
/// assert_eq!(token.access_token, "xyz");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token type, rendered first (e.g. `Bearer`).
    pub token_type: String,
    /// The token itself.
    pub access_token: String,
}

impl Token {
    /// Creates a token of the given type.
    pub fn new(token_type: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            access_token: access_token.into(),
        }
    }

    /// Creates a `Bearer` token.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self::new("Bearer", access_token)
    }

    /// Renders the `Authorization` header value: `"<token_type> <access_token>"`.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Renders the `Authorization` header value as a sensitive [`HeaderValue`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the access token is empty or the rendered value
    /// contains characters not allowed in a header.
    pub fn header_value(&self) -> Result<HeaderValue, AuthError> {
        if self.access_token.is_empty() {
            return Err(AuthError::MissingAccessToken {
                token_type: self.token_type.clone(),
            });
        }
        let mut value =
            HeaderValue::try_from(self.authorization()).map_err(|_| AuthError::InvalidTokenFormat)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("token_type", &self.token_type)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Basic-auth credentials for the session a root creates for itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User name.
    pub username: String,
    /// Password, if any.
    pub password: Option<String>,
}

impl Credentials {
    /// Creates username/password credentials.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Some(password.into()),
        }
    }

    /// Creates credentials with a user name only.
    pub fn username(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
