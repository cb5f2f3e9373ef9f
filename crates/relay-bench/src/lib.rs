//! Shared fixtures for the Relay benchmarks.

use relay_codec::Value;
use serde_json::json;

/// Build a representative message value carrying roughly `payload_bytes` of
/// string content.
#[must_use]
pub fn sample_value(payload_bytes: usize) -> Value {
    json!({
        "event": "bench",
        "payload": "x".repeat(payload_bytes),
    })
}

/// Build a batch of `count` distinct message values.
#[must_use]
pub fn sample_batch(count: usize) -> Vec<Value> {
    (0..count).map(|i| json!({"seq": i, "body": "message"})).collect()
}
