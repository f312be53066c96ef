//! Incremental tail endpoint.

use axum::Form;
use axum::extract::State;
use axum::response::Response;
use tw_log_engine::{Cursor, FilterSet};
use tw_protocol::TailRequest;
use tw_protocol::encode_hex;
use tw_protocol::headers::{LAST_MODIFICATION, SEEK_POSITION};

use super::{blocking, text_response};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET|POST /tail: content appended since the caller's cursor.
///
/// The body holds the new lines; `Seek-Position` and `Last-Modification`
/// carry the cursor for the next poll.
pub async fn tail(
    State(state): State<AppState>,
    Form(req): Form<TailRequest>,
) -> ApiResult<Response> {
    let cursor = Cursor::from_wire(req.seek_position()?, req.last_modification_nanos()?);
    let filters = FilterSet::new(req.filters());
    let source = state.sources.find(&req.log_name)?.clone();

    let engine = state.engine.clone();
    let outcome = blocking(move || engine.tail(&source, cursor, &filters, false)).await?;

    Ok(text_response(
        outcome.content,
        [
            (SEEK_POSITION, encode_hex(outcome.cursor.offset)),
            (LAST_MODIFICATION, encode_hex(outcome.cursor.mod_time_nanos())),
        ],
    ))
}
