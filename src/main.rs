//! geo-gate - Country-based admission check service
//!
//! This is the composition root: it loads configuration, provisions the
//! matcher and serves `204 No Content` to every admitted peer.

use axum::{http::StatusCode, Router};
use geo_gate::infrastructure::shutdown_signal;
use geo_gate::{load_config, protect, provision};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt().with_max_level(log_level).init();

    tracing::info!(
        "starting geo-gate listen={} allow={:?} deny={:?}",
        cfg.listen_addr,
        cfg.filter.allow_countries,
        cfg.filter.deny_countries
    );

    let matcher = Arc::new(provision(&cfg.filter)?);

    let app = protect(
        Router::new().fallback(|| async { StatusCode::NO_CONTENT }),
        matcher.clone(),
    )
    .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        shutdown_signal().await;
    })
    .await?;

    // In-flight requests have drained; safe to release the database.
    matcher.cleanup();
    tracing::info!("geo-gate stopped");

    Ok(())
}
