//! Serializer lookup errors.

use thiserror::Error;

/// Errors when selecting a codec from a [`SerializerRegistry`](crate::SerializerRegistry).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SerializerError {
    /// The registry holds no codecs at all.
    #[error("There are no available serializers")]
    NoneAvailable,

    /// No codec answers to the requested name or content type.
    #[error("Serializer not available: {query}")]
    NotAvailable {
        /// The name or content type that was looked up.
        query: String,
    },
}

impl SerializerError {
    /// Creates a not-available error for the given name or content type.
    pub fn not_available(query: impl Into<String>) -> Self {
        Self::NotAvailable {
            query: query.into(),
        }
    }
}
