//! # Trigger Endpoint Server
//!
//! This module defines the `TriggerServer`, the HTTP surface through which
//! the hosting platform invokes the notification dispatcher. One route
//! receives document-created events; the invocation outcome travels back in
//! the response so the platform's retry policy can act on failures.
//!
//! When metrics are enabled the same server also exposes `/metrics` in the
//! Prometheus exposition format.
//!
//! The server is designed for graceful shutdown, listening to a signal from
//! the main application to stop serving requests and terminate cleanly.

use crate::core::Messaging;
use crate::dispatch::{dispatch_created_document, DispatchOutcome};
use crate::event::DocumentCreatedEvent;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, trace};

/// Shared state handed to every request handler.
pub struct AppState {
    /// The process-wide delivery handle, constructed once at startup.
    pub messaging: Arc<dyn Messaging>,
    /// Renders the metrics snapshot; `None` when metrics are disabled.
    pub prom_handle: Option<PrometheusHandle>,
}

/// A server that receives trigger invocations from the hosting platform.
pub struct TriggerServer {
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown_rx: watch::Receiver<bool>,
}

impl TriggerServer {
    /// Creates a new `TriggerServer` but does not spawn it.
    ///
    /// # Arguments
    ///
    /// * `listener` - A `TcpListener` that has already been bound to an address.
    /// * `state` - Shared handler state.
    /// * `shutdown_rx` - A watch channel receiver for graceful shutdown.
    pub fn new(
        listener: TcpListener,
        state: Arc<AppState>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            listener,
            state,
            shutdown_rx,
        }
    }

    /// Builds the router serving the trigger contract.
    pub fn router(state: Arc<AppState>) -> Router {
        let mut router = Router::new().route(
            "/v1/events/document-created",
            post(handle_document_created),
        );
        if state.prom_handle.is_some() {
            router = router.route("/metrics", get(render_metrics));
        }
        router.with_state(state)
    }

    /// Returns a future that runs the server until a shutdown signal is received.
    pub fn run(mut self) -> impl Future<Output = ()> {
        let app = Self::router(self.state.clone());

        async move {
            tokio::select! {
                biased;
                _ = self.shutdown_rx.changed() => {
                    trace!("Trigger server received shutdown signal via select.");
                }
                result = axum::serve(self.listener, app.into_make_service()) => {
                    if let Err(e) = result {
                        error!("Trigger server error: {}", e);
                    }
                }
            }
            trace!("Trigger server task finished.");
        }
    }
}

/// The trigger contract: one invocation per newly created document.
///
/// Success on both the sent and no-data paths is a 200; a delivery failure
/// maps to 502 so the platform records the invocation as failed.
async fn handle_document_created(
    State(state): State<Arc<AppState>>,
    Json(event): Json<DocumentCreatedEvent>,
) -> impl IntoResponse {
    match dispatch_created_document(&event, state.messaging.as_ref()).await {
        Ok(DispatchOutcome::Sent { message_name }) => (
            StatusCode::OK,
            Json(json!({ "status": "sent", "message_name": message_name })),
        ),
        Ok(DispatchOutcome::NoData) => (StatusCode::OK, Json(json!({ "status": "skipped" }))),
        Err(e) => {
            error!(error = %e, "dispatch failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "status": "error", "error": e.to_string() })),
            )
        }
    }
}

async fn render_metrics(State(state): State<Arc<AppState>>) -> String {
    state
        .prom_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}
