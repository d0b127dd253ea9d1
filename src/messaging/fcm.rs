//! A client for the push delivery service's HTTP `messages:send` endpoint.

use crate::config::MessagingConfig;
use crate::core::{Messaging, PushMessage};
use crate::messaging::MessagingError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

/// Wire envelope for a send request.
#[derive(Serialize)]
struct SendRequest<'a> {
    message: &'a PushMessage,
}

/// The delivery service's acknowledgement of an accepted message.
#[derive(Deserialize)]
struct SendReceipt {
    /// Fully qualified name of the accepted message,
    /// e.g. `projects/my-project/messages/0:12345`.
    name: String,
}

/// A client for the FCM-shaped `messages:send` HTTP API.
///
/// Constructed once at process startup; the pooled HTTP client inside is
/// shared by every invocation for the life of the process.
pub struct FcmClient {
    http: reqwest::Client,
    send_url: String,
    auth_token: Option<String>,
}

impl FcmClient {
    /// Creates a new `FcmClient` from the messaging configuration.
    pub fn from_config(config: &MessagingConfig) -> Result<Self, MessagingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            send_url: format!(
                "{}/v1/projects/{}/messages:send",
                config.base_url.trim_end_matches('/'),
                config.project_id
            ),
            auth_token: config.auth_token.clone(),
        })
    }
}

#[async_trait]
impl Messaging for FcmClient {
    /// Posts a single push message to the delivery endpoint.
    #[instrument(skip(self, message), fields(topic = %message.topic))]
    async fn send(&self, message: &PushMessage) -> Result<String, MessagingError> {
        let mut request = self.http.post(&self.send_url).json(&SendRequest { message });
        // TODO: mint bearer tokens from a service-account flow instead of a
        // static configured token.
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                body = %body,
                "delivery service rejected the message"
            );
            return Err(MessagingError::Rejected { status, body });
        }

        let receipt: SendReceipt = response.json().await?;
        info!(message_name = %receipt.name, "message accepted by delivery service");
        Ok(receipt.name)
    }
}
