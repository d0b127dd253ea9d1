//! Core domain types and service traits for chatpush
//!
//! This module defines the fundamental data structures and trait contracts
//! that govern component interactions throughout the application.

use crate::messaging::MessagingError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The fixed broadcast topic every push message is addressed to. All
/// subscribed clients receive every message; there is no per-recipient
/// targeting and no exclusion of the message's author.
pub const CHAT_TOPIC: &str = "chat";

/// The fixed client-side routing hint carried in every push message's data
/// payload.
pub const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";

/// The user-visible part of a push message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    /// Notification title, copied verbatim from the chat message's username.
    pub title: String,
    /// Notification body, copied verbatim from the chat message's text.
    pub body: String,
}

/// Application-level key/value payload delivered alongside the notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientData {
    pub click_action: String,
}

/// A single topic-addressed push message, built once per dispatch and
/// discarded after the delivery call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PushMessage {
    pub notification: Notification,
    pub data: ClientData,
    pub topic: String,
}

impl PushMessage {
    /// Builds a broadcast message for the chat topic. The topic and routing
    /// hint are fixed; only title and body vary with the input.
    pub fn broadcast(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            notification: Notification {
                title: title.into(),
                body: body.into(),
            },
            data: ClientData {
                click_action: CLICK_ACTION.to_string(),
            },
            topic: CHAT_TOPIC.to_string(),
        }
    }
}

// =============================================================================
// Service Traits
// =============================================================================

/// Hands push messages to a delivery service.
#[async_trait]
pub trait Messaging: Send + Sync {
    /// Requests delivery of a single push message.
    ///
    /// # Returns
    /// * `Ok(name)` with the delivery service's assigned message name
    /// * `Err` if the service rejected the message or the call never completed
    async fn send(&self, message: &PushMessage) -> Result<String, MessagingError>;
}
