//! Shared application state for the Axum server.

use std::sync::Arc;

use tw_log_engine::{LogEngine, SourceRegistry};

use crate::config::ServerConfig;

/// Shared application state, wrapped in `Arc` for Axum handler sharing.
///
/// Everything here is immutable after startup; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<LogEngine>,
    pub sources: Arc<SourceRegistry>,
    /// Bytes before end of file where the initial view of a log starts.
    pub initial_tail_bytes: u64,
}

impl AppState {
    pub fn new(engine: LogEngine, sources: SourceRegistry, initial_tail_bytes: u64) -> Self {
        Self {
            engine: Arc::new(engine),
            sources: Arc::new(sources),
            initial_tail_bytes,
        }
    }

    /// Build state from a validated configuration.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let engine = LogEngine::new(&config.line_regex, config.limits())?;
        let sources = SourceRegistry::new(config.logs.clone())?;
        Ok(Self::new(engine, sources, config.initial_tail_bytes))
    }
}
