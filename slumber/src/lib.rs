//! Slumber
//!
//! A generic client for REST APIs. An API is navigated as a tree of
//! resources: each child extends the parent's URL by one path segment, and
//! each verb performs one HTTP exchange, encoding the request body and
//! decoding the reply according to the negotiated media type.
//!
//! ## Core Types
//!
//! - [`Api`] / [`ApiBuilder`] - The root: base URL, credentials, format, serializers
//! - [`Resource`] - One endpoint, with `get`, `post`, `put`, `patch` and `delete`
//! - [`ResourceConfig`] - The immutable settings shared down the tree
//! - [`SerializerRegistry`] - Media type to [`Codec`] lookup (JSON, YAML, form)
//! - [`Content`] - A decoded or raw response body
//! - [`Session`] - The transport seam; [`HttpSession`] is backed by `reqwest`
//! - [`ApiError`] - The error taxonomy, with 4xx and 5xx kept apart
//!
//! ## Examples
//!
//! ```rust,ignore
//! use slumber::{Api, Token};
//! use serde_json::json;
//!
//! let api = Api::builder()
//!     .base_url("https://api.example.com/v1/")
//!     .token(Token::bearer("abc123"))
//!     .build()?;
//!
//! // GET https://api.example.com/v1/notes/?limit=10
//! let notes = api.child("notes")?.get(&[("limit", "10")]).await?;
//!
//! // PUT https://api.example.com/v1/notes/3/ in YAML
//! api.child("notes")?
//!     .with_id(3)
//!     .with_format("yaml")
//!     .put(json!({"title": "groceries"}), &[])
//!     .await?;
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod content;
pub mod error;
pub mod method;
pub mod path;
pub mod resource;
pub mod serialize;
pub mod session;

// Re-export main types at crate root
pub use api::{Api, ApiBuilder};
pub use auth::{Credentials, Token};
pub use config::{ResourceConfig, ResponseHook, DEFAULT_FORMAT};
pub use content::Content;
pub use error::{
    ApiError, AuthError, ClientError, ConfigError, HttpError, HttpFailure, SerializerError,
    ValidationError,
};
pub use method::RestMethod;
pub use path::{ensure_trailing_slash, url_join};
pub use resource::{Body, CallOptions, Resource};
pub use serialize::{Codec, FormCodec, JsonCodec, SerializerRegistry, YamlCodec};
pub use session::{
    FilePart, HttpRequest, HttpResponse, HttpSession, HttpSessionBuilder, MultipartForm,
    RequestBody, Session,
};
