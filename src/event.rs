//! Inbound trigger event model.
//!
//! The hosting platform pushes one event per document created in the watched
//! `chat/{messageId}` collection. This module gives that payload a typed
//! shape; field access stays permissive, so a sparse document degrades to
//! empty values instead of failing the invocation.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A document-created trigger invocation payload.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DocumentCreatedEvent {
    /// Path of the created document relative to the database root, of the
    /// shape `chat/{messageId}`.
    pub document: String,
    /// Event timestamp assigned by the platform. Informational only.
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    /// Snapshot of the new document's fields at creation time. `None` when
    /// the platform delivered the event without materialized data.
    #[serde(default)]
    pub data: Option<ChatMessage>,
}

/// Field map of a chat message document.
///
/// Both fields are optional on the wire. A missing field is not an error;
/// it is passed onward as an empty value.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ChatMessage {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl DocumentCreatedEvent {
    /// The `{messageId}` segment of the document path, for log correlation.
    pub fn message_id(&self) -> &str {
        self.document.rsplit('/').next().unwrap_or("")
    }
}
