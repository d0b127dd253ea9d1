//! The notification dispatcher.
//!
//! A pure, stateless, single-shot mapping from one trigger event to at most
//! one delivery call. The only branch is data present vs absent; everything
//! else (retries, fan-out, ordering) belongs to the platforms on either side.

use crate::core::{Messaging, PushMessage};
use crate::event::DocumentCreatedEvent;
use crate::messaging::MessagingError;
use tracing::{info, instrument};

/// Outcome of a single dispatcher invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A push message was accepted by the delivery service.
    Sent { message_name: String },
    /// The event carried no document snapshot; nothing was sent.
    NoData,
}

/// Handles one document-created event.
///
/// On the present-data path this makes exactly one delivery call, copying
/// `username` into the notification title and `text` into the body with no
/// transformation. Missing fields degrade to empty strings; the source
/// record is never validated or mutated. A delivery failure propagates
/// unmodified to the caller.
#[instrument(skip(event, messaging), fields(message_id = %event.message_id()))]
pub async fn dispatch_created_document(
    event: &DocumentCreatedEvent,
    messaging: &dyn Messaging,
) -> Result<DispatchOutcome, MessagingError> {
    metrics::counter!("events_received").increment(1);

    let Some(chat) = &event.data else {
        info!("no data associated with the event");
        metrics::counter!("events_skipped_no_data").increment(1);
        return Ok(DispatchOutcome::NoData);
    };

    let message = PushMessage::broadcast(
        chat.username.clone().unwrap_or_default(),
        chat.text.clone().unwrap_or_default(),
    );

    match messaging.send(&message).await {
        Ok(message_name) => {
            metrics::counter!("notifications_sent").increment(1);
            info!(%message_name, "notification dispatched");
            Ok(DispatchOutcome::Sent { message_name })
        }
        Err(e) => {
            metrics::counter!("delivery_failures").increment(1);
            Err(e)
        }
    }
}
