//! Energy assistant API: resolves natural-language energy queries.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use ea_api::config::ApiConfig;
use ea_api::routes::build_router;
use ea_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ea-api starting");

    let config = ApiConfig::load()?;
    let state = AppState::from_config(&config)?;
    tracing::info!(
        regions = config.regions.len(),
        fallback = state.classifier.has_fallback(),
        "intent classifier ready"
    );

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
