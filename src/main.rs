//! Honeybee order site entry point

use anyhow::Context;
use honeybee::config::{AppConfig, MailBackend, OrderDatabase};
use honeybee::notifications::LogTransport;
use honeybee::server::ServerBuilder;
use honeybee::storage::InMemoryOrderStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "honeybee=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        "Configuration loaded: host={}, port={}, mail_backend={:?}",
        config.app_host,
        config.app_port,
        config.mail_backend
    );

    if !config.debug && config.uses_default_secret() {
        tracing::warn!("SECRET_KEY is not set; using the insecure development key");
    }

    let bind_address = config.bind_address();
    let builder = ServerBuilder::new();

    let builder = match &config.database {
        OrderDatabase::Memory => {
            tracing::warn!("DATABASE_URL is `memory`; orders are lost on restart");
            builder.with_order_store(InMemoryOrderStore::new())
        }
        #[cfg(feature = "sqlite")]
        OrderDatabase::Sqlite(url) => {
            let store = honeybee::storage::SqliteOrderStore::connect(url)
                .await
                .context("failed to open the order database")?;
            tracing::info!("Orders are stored in SQLite");
            builder.with_order_store(store)
        }
        #[cfg(not(feature = "sqlite"))]
        OrderDatabase::Sqlite(_) => {
            anyhow::bail!("built without the `sqlite` feature; set DATABASE_URL=memory")
        }
    };

    let builder = match config.mail_backend {
        MailBackend::Log => builder.with_transport(LogTransport::new()),
        #[cfg(feature = "sendgrid")]
        MailBackend::SendGrid => builder.with_transport(
            honeybee::notifications::SendGridTransport::new(config.sendgrid_api_key.clone()),
        ),
        #[cfg(not(feature = "sendgrid"))]
        MailBackend::SendGrid => {
            tracing::warn!("built without the `sendgrid` feature; mail goes to the log");
            builder.with_transport(LogTransport::new())
        }
    };

    builder.with_config(config).serve(&bind_address).await
}
