//! The pub/sub adapter.
//!
//! [`PubSubAdapter`] wraps a backend client and normalizes application
//! values into wire payloads and back. Callers deal with channel names,
//! handlers, and values; the client deals with transport.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use futures_util::future;
use relay_codec::{codec, CodecError, Value};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::client::{BackendClient, BlockingBackendClient, ClientError, Deferred};

/// A channel identifier. Opaque; matched by exact string equality.
pub type ChannelId = String;

/// Handler invoked with each decoded message value on a subscribed channel.
pub type MessageHandler = Box<dyn Fn(Value) + Send + Sync + 'static>;

/// Adapter errors.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The payload codec rejected a value or a payload.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The backend rejected a call. Carries the backend error unmodified.
    #[error("backend error: {0}")]
    Backend(#[from] ClientError),
}

/// What to do with a delivered payload that does not decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Hand the raw payload to the handler as a plain string value.
    #[default]
    ForwardRaw,
    /// Drop the message and report the failure through the log.
    DropAndReport,
}

/// A channel-oriented pub/sub adapter over a backend client.
///
/// Construction performs no I/O. The adapter keeps no connection state and
/// holds no locks across backend calls; its only shared state is the
/// handler registry consulted on delivery. Handlers run synchronously on
/// the backend's delivery context and must not subscribe or unsubscribe on
/// the same adapter from inside a delivery.
pub struct PubSubAdapter<C: BackendClient> {
    client: C,
    handlers: Arc<DashMap<ChannelId, Vec<MessageHandler>>>,
    listener_installed: AtomicBool,
    policy: DecodePolicy,
}

impl<C: BackendClient> PubSubAdapter<C> {
    /// Create an adapter over a result-bearing backend client.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self::with_policy(client, DecodePolicy::default())
    }

    /// Create an adapter with an explicit decode-failure policy.
    #[must_use]
    pub fn with_policy(client: C, policy: DecodePolicy) -> Self {
        Self {
            client,
            handlers: Arc::new(DashMap::new()),
            listener_installed: AtomicBool::new(false),
            policy,
        }
    }

    /// Get the wrapped client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Get the decode-failure policy.
    #[must_use]
    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Get the channels that currently have handler bindings.
    #[must_use]
    pub fn channels(&self) -> Vec<ChannelId> {
        self.handlers.iter().map(|e| e.key().clone()).collect()
    }

    /// Get the number of handlers bound to a channel.
    #[must_use]
    pub fn handler_count(&self, channel: &str) -> usize {
        self.handlers.get(channel).map(|e| e.len()).unwrap_or(0)
    }

    /// Subscribe a handler to a channel.
    ///
    /// The handler is invoked with the decoded value of every message
    /// delivered on exactly this channel; messages for other channels never
    /// reach it. Several handlers may be bound to one channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the subscribe call. The
    /// handler binding is rolled back in that case.
    pub async fn subscribe<F>(
        &self,
        channel: impl Into<ChannelId>,
        handler: F,
    ) -> Result<(), AdapterError>
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        let channel = channel.into();

        self.install_listener();
        self.handlers
            .entry(channel.clone())
            .or_default()
            .push(Box::new(handler));

        if let Err(err) = self.client.subscribe(&channel).await {
            if let Some(mut entry) = self.handlers.get_mut(&channel) {
                entry.pop();
                if entry.is_empty() {
                    drop(entry); // Release the lock
                    self.handlers.remove(&channel);
                }
            }
            return Err(err.into());
        }

        debug!(
            channel = %channel,
            handlers = self.handler_count(&channel),
            "Subscribed"
        );

        Ok(())
    }

    /// Drop every handler binding for a channel.
    ///
    /// Returns `true` if any binding existed. Local only: the backend keeps
    /// whatever subscription state it has, and further deliveries for the
    /// channel are ignored by the empty registry.
    pub fn unsubscribe(&self, channel: &str) -> bool {
        let removed = self.handlers.remove(channel).is_some();
        if removed {
            debug!(channel = %channel, "Unsubscribed");
        }
        removed
    }

    /// Publish a value to a channel.
    ///
    /// The value is encoded to its wire text form and handed to the
    /// backend in a single call. The backend's ack is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Codec`] if the value cannot be encoded — the
    /// backend is never called — or [`AdapterError::Backend`] if the
    /// backend rejects the publish.
    pub async fn publish<T>(&self, channel: &str, value: &T) -> Result<C::Ack, AdapterError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let payload = codec::encode(value)?;
        trace!(channel = %channel, bytes = payload.len(), "Publishing message");
        Ok(self.client.publish(channel, &payload).await?)
    }

    /// Publish a sequence of values to a channel, in order.
    ///
    /// One publish per value is issued in input order; completions may
    /// interleave, but the returned acks are in input order regardless. Any
    /// single failure fails the whole batch. An empty input succeeds with
    /// an empty ack sequence without touching the backend.
    ///
    /// # Errors
    ///
    /// Returns the first per-value error, exactly as [`publish`] would.
    ///
    /// [`publish`]: Self::publish
    pub async fn publish_batch<T>(
        &self,
        channel: &str,
        values: &[T],
    ) -> Result<Vec<C::Ack>, AdapterError>
    where
        T: Serialize + Sync,
    {
        if values.is_empty() {
            return Ok(Vec::new());
        }

        future::try_join_all(values.iter().map(|value| self.publish(channel, value))).await
    }

    /// Install the backend delivery listener, once per adapter.
    fn install_listener(&self) {
        if self.listener_installed.swap(true, Ordering::SeqCst) {
            return;
        }

        let handlers = Arc::clone(&self.handlers);
        let policy = self.policy;
        self.client.on_message(Box::new(move |channel, payload| {
            dispatch(&handlers, policy, channel, payload);
        }));
    }
}

impl<B: BlockingBackendClient> PubSubAdapter<Deferred<B>> {
    /// Create an adapter over a blocking client.
    ///
    /// The client is wrapped in [`Deferred`] so publish operations yield a
    /// result-bearing future.
    #[must_use]
    pub fn from_blocking(client: B) -> Self {
        Self::new(Deferred::new(client))
    }

    /// Create an adapter over a blocking client with an explicit
    /// decode-failure policy.
    #[must_use]
    pub fn from_blocking_with_policy(client: B, policy: DecodePolicy) -> Self {
        Self::with_policy(Deferred::new(client), policy)
    }
}

/// Route one delivered `(channel, payload)` event to the channel's handlers.
fn dispatch(
    handlers: &DashMap<ChannelId, Vec<MessageHandler>>,
    policy: DecodePolicy,
    channel: &str,
    payload: &str,
) {
    let Some(entry) = handlers.get(channel) else {
        trace!(channel = %channel, "No handlers for channel, ignoring");
        return;
    };

    let value = match codec::decode(payload) {
        Ok(value) => value,
        Err(err) => match policy {
            DecodePolicy::ForwardRaw => {
                trace!(channel = %channel, error = %err, "Undecodable payload, forwarding raw");
                Value::String(payload.to_owned())
            }
            DecodePolicy::DropAndReport => {
                warn!(channel = %channel, error = %err, "Dropping undecodable payload");
                return;
            }
        },
    };

    for handler in entry.iter() {
        handler(value.clone());
    }
}
