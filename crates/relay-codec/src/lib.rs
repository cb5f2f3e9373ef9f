//! # relay-codec
//!
//! Wire payload codec for the Relay pub/sub adapter.
//!
//! This crate defines the serialization contract between adapter instances:
//! message values are encoded as JSON text before they cross the wire and
//! decoded back on delivery. JSON is the one piece of the contract that has
//! to be interoperable — any two adapter instances on the same channel,
//! possibly in different processes or different implementations, must be able
//! to decode each other's payloads.
//!
//! ## Value Model
//!
//! Payloads are schemaless. The decoded form is [`Value`], covering:
//!
//! - Scalars - strings, numbers, booleans, null
//! - Ordered lists
//! - Key-ordered mappings
//!
//! ## Example
//!
//! ```rust
//! use relay_codec::codec;
//!
//! let payload = codec::encode("Hello World!").unwrap();
//! assert_eq!(payload, "\"Hello World!\"");
//!
//! let value = codec::decode(&payload).unwrap();
//! assert_eq!(value, "Hello World!");
//! ```

pub mod codec;

pub use codec::{decode, encode, CodecError};
pub use serde_json::Value;
