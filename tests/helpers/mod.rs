pub mod fake_messaging;

use serde_json::{json, Value};

/// Builds a document-created event body for a message with both fields set.
pub fn created_event(message_id: &str, username: &str, text: &str) -> Value {
    json!({
        "document": format!("chat/{message_id}"),
        "time": "2024-05-01T12:00:00Z",
        "data": { "username": username, "text": text },
    })
}
