//! # relay-backend
//!
//! Backend client implementations for the Relay pub/sub adapter.
//!
//! The adapter in `relay-core` consumes the `BackendClient` capability seam;
//! this crate provides clients that satisfy it:
//!
//! - **MemoryBackend** - An in-process loopback bus. Delivery is synchronous
//!   and local, which makes it the backend of choice for tests, benches, and
//!   embedding the adapter without a broker.
//!
//! ## Example
//!
//! ```rust,ignore
//! use relay_backend::MemoryBackend;
//! use relay_core::PubSubAdapter;
//! use std::sync::Arc;
//!
//! let backend = Arc::new(MemoryBackend::new());
//! let adapter = PubSubAdapter::new(Arc::clone(&backend));
//! ```

pub mod memory;

pub use memory::MemoryBackend;
