//! Backend client capability traits.
//!
//! The adapter never talks to a concrete pub/sub client type. It consumes
//! the capability set defined here, so any backend — a network client, an
//! in-process loopback, a test double — can sit behind it.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Listener invoked by the backend for every delivered `(channel, payload)`
/// event.
///
/// The backend calls this from its own delivery context; the listener must
/// not assume anything about which thread or task that is.
pub type MessageListener = Box<dyn Fn(&str, &str) + Send + Sync + 'static>;

/// Backend client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection to the backend was closed.
    #[error("connection closed")]
    ConnectionClosed,

    /// The backend rejected a publish call.
    #[error("publish rejected: {0}")]
    PublishRejected(String),

    /// The backend rejected a subscribe call.
    #[error("subscribe rejected: {0}")]
    SubscribeRejected(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

/// A pub/sub backend client with result-bearing operations.
///
/// This is the full capability set the adapter consumes: publish a payload
/// to a channel, begin delivery for a channel, and register a delivery
/// listener. Connection handling, reconnects, buffering, and delivery
/// guarantees all live behind this seam.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Acknowledgment value the backend yields for each publish.
    ///
    /// The adapter forwards acks to its caller unchanged; it attaches no
    /// meaning to them.
    type Ack: Send;

    /// Publish an encoded payload to a channel.
    async fn publish(&self, channel: &str, payload: &str) -> Result<Self::Ack, ClientError>;

    /// Begin delivery for a channel. Side effect only.
    async fn subscribe(&self, channel: &str) -> Result<(), ClientError>;

    /// Register a listener for delivered messages.
    ///
    /// Listeners receive every `(channel, payload)` event the client
    /// delivers, across all channels it is subscribed to.
    fn on_message(&self, listener: MessageListener);
}

#[async_trait]
impl<C> BackendClient for Arc<C>
where
    C: BackendClient + ?Sized,
{
    type Ack = C::Ack;

    async fn publish(&self, channel: &str, payload: &str) -> Result<Self::Ack, ClientError> {
        (**self).publish(channel, payload).await
    }

    async fn subscribe(&self, channel: &str) -> Result<(), ClientError> {
        (**self).subscribe(channel).await
    }

    fn on_message(&self, listener: MessageListener) {
        (**self).on_message(listener);
    }
}

/// A pub/sub backend client whose operations complete synchronously.
///
/// Clients that expose this surface instead of [`BackendClient`] are adapted
/// with [`Deferred`] at construction time.
pub trait BlockingBackendClient: Send + Sync {
    /// Acknowledgment value the backend yields for each publish.
    type Ack: Send;

    /// Publish an encoded payload to a channel.
    fn publish(&self, channel: &str, payload: &str) -> Result<Self::Ack, ClientError>;

    /// Begin delivery for a channel. Side effect only.
    fn subscribe(&self, channel: &str) -> Result<(), ClientError>;

    /// Register a listener for delivered messages.
    fn on_message(&self, listener: MessageListener);
}

/// Bridge that gives a blocking client the result-bearing contract.
///
/// Each operation is adapted exactly once, statically: the wrapped call runs
/// to completion and its result is yielded as an already-resolved future. A
/// client that already implements [`BackendClient`] never goes through this
/// type.
pub struct Deferred<C> {
    inner: C,
}

impl<C> Deferred<C> {
    /// Wrap a blocking client.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self { inner: client }
    }

    /// Get a reference to the wrapped client.
    #[must_use]
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Unwrap, returning the inner client.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.inner
    }
}

#[async_trait]
impl<C> BackendClient for Deferred<C>
where
    C: BlockingBackendClient,
{
    type Ack = C::Ack;

    async fn publish(&self, channel: &str, payload: &str) -> Result<Self::Ack, ClientError> {
        self.inner.publish(channel, payload)
    }

    async fn subscribe(&self, channel: &str) -> Result<(), ClientError> {
        self.inner.subscribe(channel)
    }

    fn on_message(&self, listener: MessageListener) {
        self.inner.on_message(listener);
    }
}
