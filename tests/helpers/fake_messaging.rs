//! A fake delivery client for exercising the server without any network.

use async_trait::async_trait;
use chatpush::core::{Messaging, PushMessage};
use chatpush::messaging::MessagingError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct FakeMessaging {
    pub sent: Arc<Mutex<Vec<PushMessage>>>,
    failing: Arc<AtomicBool>,
}

impl FakeMessaging {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_messages(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Makes every subsequent send fail with a rejection.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Messaging for FakeMessaging {
    async fn send(&self, message: &PushMessage) -> Result<String, MessagingError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MessagingError::Rejected {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: "delivery unavailable".to_string(),
            });
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(message.clone());
        Ok(format!("projects/test/messages/0:{}", sent.len()))
    }
}
