use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tracing_subscriber::EnvFilter;

use pinned_client::ReqwestFetcher;
use pinned_core::cache::{CacheConfig, MokaRepoCache};
use pinned_core::pipeline::PinnedRepoService;
use pinned_server::routes;
use pinned_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pinned=info".parse()?))
        .with_target(false)
        .init();

    let port = std::env::var("PINNED_PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let ttl_secs = env_parse("PINNED_CACHE_TTL_SECS").unwrap_or(3600);
    let max_capacity = env_parse("PINNED_CACHE_CAPACITY");
    let timeout_secs = env_parse("PINNED_FETCH_TIMEOUT_SECS").unwrap_or(10);

    let fetcher = ReqwestFetcher::with_timeout(Duration::from_secs(timeout_secs))?;
    let cache = MokaRepoCache::new(CacheConfig {
        ttl: Duration::from_secs(ttl_secs),
        max_capacity,
    });
    let state = Arc::new(AppState {
        service: PinnedRepoService::new(fetcher),
        cache,
    });

    // Global inbound rate limit, keyed by peer IP: replenish one request
    // every 2 seconds with a burst allowance.
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(30)
            .finish()
            .context("invalid rate limit configuration")?,
    );

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer::new(governor_conf));

    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    tracing::info!("Shutdown signal received");
}
