//! `signet-server` binary: serves the read-only query layer over the
//! signature registry database.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::ServiceExt;
use axum::extract::Request;
use signet_server::config::Config;
use signet_server::entities::SqliteStore;
use signet_server::routes;
use signet_server::state::AppState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config);
    info!(version = env!("CARGO_PKG_VERSION"), "signet-server starting");

    let store = SqliteStore::connect(&config.database_url)
        .await
        .with_context(|| format!("failed to open registry database {}", config.database_url))?;
    info!(database_url = %config.database_url, "registry database ready");

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .with_context(|| format!("invalid SIGNET_BIND address {:?}", config.bind_address))?;
    let swagger = config.enable_swagger;

    let state = Arc::new(AppState {
        config: Arc::new(config),
        store: Arc::new(store.clone()),
    });
    let app = routes::build(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, swagger, "query layer listening on {}", routes::API_PREFIX);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("signet-server stopped");
    Ok(())
}

/// `RUST_LOG` wins over `SIGNET_LOG`; an unparsable filter falls back to `info`.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|e| {
            eprintln!(
                "WARN: SIGNET_LOG='{}' is not a valid tracing filter ({e}); using 'info'",
                config.log_level
            );
            EnvFilter::new("info")
        })
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    res = tokio::signal::ctrl_c() => {
                        if let Err(e) = res {
                            warn!(error = %e, "ctrl-c handler failed");
                        }
                    }
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable; waiting for ctrl-c only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl-c handler failed");
    }

    info!("shutdown requested; draining connections");
}
