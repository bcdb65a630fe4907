//! Content negotiation.
//!
//! A [`SerializerRegistry`] maps media types to [`Codec`]s. Resources use it
//! twice per exchange: the active codec encodes the request body and names
//! the `accept`/`content-type` headers, and the response's media type picks
//! the codec that decodes the reply.

mod codec;
mod registry;

pub use codec::{Codec, FormCodec, JsonCodec, YamlCodec};
pub use registry::SerializerRegistry;
