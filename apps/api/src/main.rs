mod classifier;
mod client_key;
mod config;
mod errors;
mod quota;
mod routes;
mod scans;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::classifier::ScoreClassifier;
use crate::config::Config;
use crate::quota::clock::{DayClock, SystemDayClock};
use crate::quota::sweeper::spawn_daily_sweep;
use crate::quota::tracker::QuotaTracker;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; invalid thresholds or ceiling abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobFit API v{}", env!("CARGO_PKG_VERSION"));

    let clock: Arc<dyn DayClock> = match config.quota_utc_offset {
        Some(offset) => Arc::new(SystemDayClock::with_offset(offset)),
        None => Arc::new(SystemDayClock::local()),
    };
    let quota = Arc::new(QuotaTracker::new(config.max_daily_scans, clock)?);
    info!("Quota tracker initialized (max daily scans: {})", quota.ceiling());

    let _sweeper = spawn_daily_sweep(Arc::clone(&quota));

    let classifier = Arc::new(ScoreClassifier::new(config.score));
    info!("Score classifier initialized: {:?}", classifier.config().tiers());

    let state = AppState { quota, classifier };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
