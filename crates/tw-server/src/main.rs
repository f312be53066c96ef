//! tailweb: live tail, paging and keyword locate over local log files.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use tw_server::config::ServerConfig;
use tw_server::routes;
use tw_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "tailweb starting");

    // ── Load config ─────────────────────────────────────────────
    let config_path = std::env::args().nth(1);
    let config = ServerConfig::load(config_path.as_deref())?;
    let state = AppState::from_config(&config)?;
    for source in state.sources.iter() {
        tracing::info!(log = %source.name(), path = %source.path().display(), "serving log");
    }

    let app = routes::build_router(state, &config.context_path);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, context_path = %config.context_path, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
