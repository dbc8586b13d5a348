//! Arc Proxy - A forwarding HTTP proxy with an in-memory response cache
//!
//! Caches origin responses by request URL and evicts by a blended
//! frequency/recency score once the cache is full.

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arc_proxy::{Config, Listener, ProxyState, TcpConnector};

/// Main entry point for the caching proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Build configuration from compile-time defaults
/// 3. Create the shared cache state
/// 4. Bind the listening socket (failure is fatal)
/// 5. Accept connections until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arc_proxy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Arc Proxy");

    let config = Config::default();
    info!(
        "Configuration: port={}, cache_capacity={}, buffer_size={}, weights={}/{}",
        config.listen_port,
        config.cache_capacity,
        config.buffer_size,
        config.weights.frequency,
        config.weights.recency
    );

    let state = ProxyState::from_config(&config);
    let listener = Listener::bind(&config)
        .await
        .context("failed to start listener")?;
    info!("Proxy listening on {}", listener.local_addr());

    let connector = TcpConnector::new(config.origin_port);
    info!("Forwarding cache misses to origin port {}", connector.port());
    tokio::select! {
        _ = listener.run(state.clone(), connector) => {}
        _ = shutdown_signal() => {}
    }

    let stats = state.stats().await;
    match serde_json::to_string(&stats) {
        Ok(json) => info!(
            stats = %json,
            hit_rate = stats.hit_rate(),
            "Proxy shutdown complete"
        ),
        Err(e) => warn!(error = %e, "Proxy shutdown complete, stats unavailable"),
    }

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
