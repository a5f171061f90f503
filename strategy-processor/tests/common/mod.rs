//! Helpers shared by the integration test crates

use serde_json::Value;
use strategy_processor::message::RawMessage;

/// Unwrap a `json!` object literal into a record
pub fn raw(value: Value) -> RawMessage {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}
