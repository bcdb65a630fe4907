//! The transport seam.
//!
//! A [`Session`] performs exactly one HTTP exchange per call. Resources never
//! talk to `reqwest` directly; they prepare an [`HttpRequest`] and hand it to
//! whatever session the root was built with. [`HttpSession`] is the stock
//! implementation.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use slumber::session::HttpSession;
//!
//! let session = HttpSession::builder()
//!     .timeout(Duration::from_secs(10))
//!     .default_header("X-Client", "slumber")?
//!     .build()?;
//! ```

mod http;
mod message;

use std::future::Future;

use crate::error::ClientError;

pub use http::{HttpSession, HttpSessionBuilder};
pub use message::{FilePart, HttpRequest, HttpResponse, MultipartForm, RequestBody};

/// Performs HTTP exchanges on behalf of resources.
///
/// The session is shared by reference between a root and every resource
/// derived from it, so implementations must be safe to use from several
/// resources at once.
pub trait Session: Send + Sync {
    /// Sends `request` and reads the whole response.
    ///
    /// Error statuses are not errors at this level; only failures to complete
    /// the exchange are.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ClientError>> + Send;
}
