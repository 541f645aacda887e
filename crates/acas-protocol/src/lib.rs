//! Wire protocol for the anchored content store.
//!
//! Defines the response envelope every invocation ends in, the invocation
//! request itself, and the framing used to carry both over a byte stream.

pub mod codec;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod message;

pub use codec::AcasCodec;
pub use endpoint::{endpoints, HealthResponse};
pub use envelope::{Response, Status};
pub use error::{ProtocolError, ProtocolResult};
pub use message::{
    Invocation, WireMessage, FRAME_HEADER_SIZE, MAX_MESSAGE_SIZE, PROTOCOL_VERSION,
};
