//! Loopback pub/sub demo.
//!
//! Subscribes a printing handler and publishes a bare string, a mapping,
//! and a batch over the in-process backend.
//!
//! ```bash
//! cargo run --example loopback
//! ```

use std::sync::Arc;

use anyhow::Result;
use relay_backend::MemoryBackend;
use relay_core::PubSubAdapter;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let backend = Arc::new(MemoryBackend::new());

    let consumer = PubSubAdapter::new(Arc::clone(&backend));
    consumer
        .subscribe("my_channel", |message| {
            println!("received: {message}");
        })
        .await?;

    let producer = PubSubAdapter::new(backend);
    producer.publish("my_channel", "Hello World").await?;
    producer
        .publish("my_channel", &json!({"first_name": "Matthew"}))
        .await?;
    producer
        .publish_batch("my_channel", &["message 1", "message 2"])
        .await?;

    Ok(())
}
