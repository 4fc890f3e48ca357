use std::sync::Arc;

use salvo::Listener;
use salvo::conn::TcpListener;
use rsvp_app::app::service;
use rsvp_core::config::{StoreBackend, load_config};
use rsvp_db::db::RsvpStore;
use rsvp_db::db::connection::create_pool;
use rsvp_db::db::memory::MemoryStore;
use rsvp_db::db::migrations::run_migrations;
use rsvp_service::ingress::RsvpService;
use rsvp_service::notify::notifier_from_settings;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting wedding RSVP server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let store: Arc<dyn RsvpStore> = match config.database.backend {
        StoreBackend::Postgres => {
            let url = config.database.postgres_url()?;
            run_migrations(url).await?;
            let pool = create_pool(url, u32::from(config.database.max_connections)).await?;
            tracing::info!("Database connection pool created.");
            Arc::new(pool)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store, RSVPs will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let notifier = notifier_from_settings(&config)?;
    let rsvp = Arc::new(RsvpService::new(store, notifier, &config));

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor)
        .serve(service(Arc::new(config), rsvp))
        .await;

    Ok(())
}
