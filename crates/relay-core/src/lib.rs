//! # relay-core
//!
//! Channel adapter core for the Relay pub/sub layer.
//!
//! This crate provides the fundamental building blocks:
//!
//! - **PubSubAdapter** - Publish/subscribe on named channels over any backend
//! - **BackendClient** - Capability trait the wrapped client must satisfy
//! - **Deferred** - Bridge giving blocking clients the result-bearing contract
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐ publish(value)  ┌───────────────┐ publish(payload) ┌─────────────┐
//! │   Caller    │────────────────▶│ PubSubAdapter │─────────────────▶│   Backend   │
//! └─────────────┘                 └───────────────┘                  └─────────────┘
//!        ▲                               ▲                                  │
//!        │ handler(value)                │ on_message(channel, payload)     │
//!        └───────── decode ──────────────┴──────────────────────────────────┘
//! ```
//!
//! The adapter owns the encode/decode contract and the per-channel handler
//! registry; everything below the `BackendClient` seam — connections,
//! delivery, ordering across subscribers — belongs to the wrapped client.

pub mod adapter;
pub mod client;

pub use adapter::{AdapterError, ChannelId, DecodePolicy, MessageHandler, PubSubAdapter};
pub use client::{BackendClient, BlockingBackendClient, ClientError, Deferred, MessageListener};
pub use relay_codec::Value;
