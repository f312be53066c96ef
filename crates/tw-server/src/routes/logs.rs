//! Initial view of every configured log.

use axum::Json;
use axum::extract::State;
use tw_log_engine::{Cursor, FilterSet};
use tw_protocol::{LogView, encode_hex};

use super::blocking;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /logs: the last few kilobytes of each log plus the cursor to tail
/// from. A log that cannot be read is reported in its `error` field.
pub async fn list_logs(State(state): State<AppState>) -> ApiResult<Json<Vec<LogView>>> {
    let back = i64::try_from(state.initial_tail_bytes).unwrap_or(i64::MAX);
    let cursor = Cursor::initial(-back);

    let views = blocking(move || {
        let filters = FilterSet::default();
        let views: Vec<LogView> = state
            .sources
            .iter()
            .map(|source| match state.engine.tail(source, cursor, &filters, true) {
                Ok(outcome) => LogView {
                    name: source.name().to_string(),
                    content: String::from_utf8_lossy(&outcome.content).into_owned(),
                    seek_position: encode_hex(outcome.cursor.offset),
                    last_modification: encode_hex(outcome.cursor.mod_time_nanos()),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(log = %source.name(), error = %e, "initial view failed");
                    LogView {
                        name: source.name().to_string(),
                        content: String::new(),
                        seek_position: encode_hex(cursor.offset),
                        last_modification: encode_hex(0),
                        error: Some(e.to_string()),
                    }
                }
            })
            .collect();
        Ok(views)
    })
    .await?;

    Ok(Json(views))
}
