//! Binary entry point for the remind server.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use remind_server::{RemindServer, ServerConfig, WebhookPublisher};
use remind_service::{CancellationPublisher, NullPublisher, RemindService};
use remind_store::{new_file, ConnectionConfig, SqliteRemindRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let pool = new_file(
        &config.database_path,
        &ConnectionConfig {
            pool_size: config.db_pool_size,
            ..ConnectionConfig::default()
        },
    )
    .with_context(|| format!("opening database at {}", config.database_path))?;
    let repo = Arc::new(SqliteRemindRepository::new(pool).context("running migrations")?);

    let publisher: Arc<dyn CancellationPublisher> = match &config.event_webhook_url {
        Some(url) => {
            info!(url = %url, "cancellation events will be posted via webhook");
            Arc::new(WebhookPublisher::new(url.clone()))
        }
        None => {
            info!("no webhook configured, cancellation events will be dropped");
            Arc::new(NullPublisher)
        }
    };

    let service = Arc::new(RemindService::new(repo, publisher));
    let server = RemindServer::new(config.clone(), service);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("binding {}", config.bind_addr()))?;
    info!(addr = %config.bind_addr(), db = %config.database_path, "remind server listening");

    axum::serve(listener, server.router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("remind server stopped");
    Ok(())
}

/// Resolves on SIGINT (and SIGTERM on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                let _ = signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
