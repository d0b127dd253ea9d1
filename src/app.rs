//! The main application logic, decoupled from the entry point.

use crate::config::Config;
use crate::core::Messaging;
use crate::messaging::fcm::FcmClient;
use crate::server::{AppState, TriggerServer};
use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

/// A handle to the running application.
pub struct App {
    local_addr: SocketAddr,
    server_task: JoinHandle<()>,
    shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Creates a new `AppBuilder` to construct an `App`.
    pub fn builder(config: Config) -> AppBuilder {
        AppBuilder::new(config)
    }

    /// The address the trigger endpoint is actually bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Waits for the server task to finish on its own.
    pub async fn run(self) -> Result<()> {
        self.server_task.await?;
        Ok(())
    }

    /// Signals shutdown and waits for the server task to stop.
    pub async fn shutdown(self) -> Result<()> {
        // The receiver may already be gone if the server failed early.
        let _ = self.shutdown_tx.send(true);
        self.server_task.await?;
        Ok(())
    }
}

/// Builder for the main application.
///
/// This pattern allows for a clean separation of concerns between
/// constructing the application's components and running the application. It
/// also provides a convenient way to override components for testing
/// purposes.
pub struct AppBuilder {
    config: Config,
    messaging_override: Option<Arc<dyn Messaging>>,
    listener_override: Option<TcpListener>,
    prom_handle: Option<PrometheusHandle>,
}

impl AppBuilder {
    /// Creates a new `AppBuilder` with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            messaging_override: None,
            listener_override: None,
            prom_handle: None,
        }
    }

    /// Overrides the delivery client, primarily for testing.
    pub fn messaging_override(mut self, messaging: Arc<dyn Messaging>) -> Self {
        self.messaging_override = Some(messaging);
        self
    }

    /// Uses an already-bound listener instead of binding the configured
    /// address. Tests bind an ephemeral port this way.
    pub fn listener(mut self, listener: TcpListener) -> Self {
        self.listener_override = Some(listener);
        self
    }

    /// Attaches a Prometheus handle, enabling the `/metrics` route.
    pub fn prometheus_handle(mut self, handle: PrometheusHandle) -> Self {
        self.prom_handle = Some(handle);
        self
    }

    /// Builds and starts the application.
    ///
    /// The delivery client is the process-wide initialization step: it is
    /// constructed exactly once here, before the first invocation can
    /// arrive, and shared by every invocation thereafter.
    pub async fn build(self) -> Result<App> {
        let messaging: Arc<dyn Messaging> = match self.messaging_override {
            Some(messaging) => messaging,
            None => Arc::new(FcmClient::from_config(&self.config.messaging)?),
        };

        let listener = match self.listener_override {
            Some(listener) => listener,
            None => TcpListener::bind(self.config.server.bind_addr).await?,
        };
        let local_addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let state = Arc::new(AppState {
            messaging,
            prom_handle: self.prom_handle,
        });

        let server = TriggerServer::new(listener, state, shutdown_rx);
        let server_task = tokio::spawn(server.run());
        info!(addr = %local_addr, "trigger endpoint listening");

        Ok(App {
            local_addr,
            server_task,
            shutdown_tx,
        })
    }
}
