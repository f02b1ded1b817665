//! ServerBuilder for fluent API to build the order site

use super::pages::Pages;
use super::router::build_routes;
use crate::config::AppConfig;
use crate::core::events::EventBus;
use crate::core::service::OrderStore;
use crate::notifications::{Composer, Dispatcher, LogTransport, MailTransport};
use crate::orders::{AppState, ClubWorkflow, OrderWorkflow};
use crate::storage::InMemoryOrderStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder wiring configuration, store and mail transport into a router
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(AppConfig::from_env()?)
///     .with_order_store(InMemoryOrderStore::new())
///     .with_transport(LogTransport::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: Option<AppConfig>,
    store: Option<Arc<dyn OrderStore>>,
    transport: Option<Arc<dyn MailTransport>>,
    event_bus: Option<EventBus>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            config: None,
            store: None,
            transport: None,
            event_bus: None,
        }
    }

    /// Set the application configuration (required)
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the order store. Defaults to [`InMemoryOrderStore`].
    pub fn with_order_store(mut self, store: impl OrderStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set the mail transport. Defaults to [`LogTransport`].
    pub fn with_transport(mut self, transport: impl MailTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use an existing event bus, so a monitor can subscribe before serving
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Build the shared handler state
    pub fn build_state(self) -> Result<AppState> {
        let config = self
            .config
            .ok_or_else(|| anyhow::anyhow!("AppConfig is required. Call .with_config()"))?;

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryOrderStore::new()));
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(LogTransport::new()));
        let events = self.event_bus.unwrap_or_default();

        let composer = Composer::new(&config)?;
        let dispatcher = Dispatcher::new(transport, config.mail_timeout);

        Ok(AppState {
            orders: OrderWorkflow::new(store, composer.clone(), dispatcher.clone(), events.clone()),
            club: ClubWorkflow::new(composer, dispatcher, events),
            pages: Arc::new(Pages::new()?),
        })
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        Ok(build_routes(self.build_state()?))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ServerBuilder::new();
        assert!(builder.config.is_none());
        assert!(builder.store.is_none());
        assert!(builder.transport.is_none());
        assert!(builder.event_bus.is_none());
    }

    #[test]
    fn test_default_is_same_as_new() {
        let builder = ServerBuilder::default();
        assert!(builder.config.is_none());
        assert!(builder.store.is_none());
    }

    #[test]
    fn test_build_without_config_fails() {
        let result = ServerBuilder::new().build();
        let err_msg = format!("{}", result.err().expect("should be Err"));
        assert!(
            err_msg.contains("AppConfig is required"),
            "error should mention AppConfig: {}",
            err_msg
        );
    }

    #[tokio::test]
    async fn test_build_state_defaults_to_in_memory_store() {
        let state = ServerBuilder::new()
            .with_config(AppConfig::for_testing())
            .build_state()
            .expect("build_state should succeed");

        assert_eq!(state.orders.store().count().await.unwrap(), 0);
    }

    #[test]
    fn test_supplied_event_bus_is_shared() {
        let bus = EventBus::new(16);
        let _rx = bus.subscribe();

        let state = ServerBuilder::new()
            .with_config(AppConfig::for_testing())
            .with_event_bus(bus)
            .build_state()
            .expect("build_state should succeed");

        assert_eq!(state.orders.events().receiver_count(), 1);
    }

    #[test]
    fn test_fluent_chaining_full_pipeline() {
        let result = ServerBuilder::new()
            .with_config(AppConfig::for_testing())
            .with_order_store(InMemoryOrderStore::new())
            .with_transport(LogTransport::new())
            .with_event_bus(EventBus::new(256))
            .build();
        assert!(result.is_ok(), "full fluent pipeline should succeed");
    }
}
