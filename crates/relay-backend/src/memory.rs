//! In-process loopback backend.
//!
//! `MemoryBackend` is a complete `BackendClient` with no transport under it:
//! published payloads are handed straight back to the registered listeners,
//! synchronously, in the publisher's context. Shared behind an `Arc`, it
//! acts as a process-local bus between any number of adapter instances.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use relay_core::{BackendClient, ClientError, MessageListener};
use tracing::{debug, trace};

/// An in-process pub/sub backend.
///
/// Delivery follows the usual client model: a listener registered with
/// [`on_message`] sees every message published on any channel this backend
/// has a subscription for. Channel filtering is the adapter's job.
///
/// [`on_message`]: BackendClient::on_message
#[derive(Default)]
pub struct MemoryBackend {
    /// Registered delivery listeners, keyed by registration id.
    listeners: DashMap<usize, MessageListener>,
    next_listener: AtomicUsize,
    /// Channels delivery has been enabled for.
    subscriptions: DashSet<String>,
}

impl MemoryBackend {
    /// Create a new backend with no listeners and no subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Check whether delivery is enabled for a channel.
    #[must_use]
    pub fn is_subscribed(&self, channel: &str) -> bool {
        self.subscriptions.contains(channel)
    }

    /// Get the number of channels with delivery enabled.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

#[async_trait]
impl BackendClient for MemoryBackend {
    /// Number of listeners the message was handed to.
    type Ack = usize;

    async fn publish(&self, channel: &str, payload: &str) -> Result<usize, ClientError> {
        if !self.subscriptions.contains(channel) {
            trace!(channel = %channel, "Publish to channel without subscription");
            return Ok(0);
        }

        let mut delivered = 0;
        for listener in self.listeners.iter() {
            listener.value()(channel, payload);
            delivered += 1;
        }

        trace!(channel = %channel, recipients = delivered, "Delivered message");
        Ok(delivered)
    }

    async fn subscribe(&self, channel: &str) -> Result<(), ClientError> {
        if self.subscriptions.insert(channel.to_string()) {
            debug!(channel = %channel, "Delivery enabled");
        }
        Ok(())
    }

    fn on_message(&self, listener: MessageListener) {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.listeners.insert(id, listener);
    }
}
