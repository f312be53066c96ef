//! Paging and keyword-locate endpoint.
//!
//! One request shape serves both: `pagingLog=yes` reads the next page up or
//! down, anything else searches for a line holding every locate keyword and
//! returns the page that starts at the matching record.

use axum::Form;
use axum::extract::State;
use axum::response::Response;
use tw_log_engine::{Direction, FilterSet, PageOutcome};
use tw_protocol::LocateRequest;
use tw_protocol::headers::{END_POSITION, LOCATE_FOUND, NOT_FOUND_BODY, START_POSITION};

use super::{blocking, signed, text_response};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET|POST /locate
pub async fn locate(
    State(state): State<AppState>,
    Form(req): Form<LocateRequest>,
) -> ApiResult<Response> {
    let direction = req.direction()?;
    let start = req.start_position()?;
    let end = req.end_position()?;
    let paging = req.is_paging()?;
    let filters = FilterSet::new(req.filters());
    let source = state.sources.find(&req.log_name)?.clone();

    let engine = state.engine.clone();
    let max_lines = engine.limits().locate_max_lines;

    if paging {
        // Down continues below the current view, up continues above it.
        let from = match direction {
            Direction::Down => end,
            Direction::Up => start,
        };
        let page = blocking(move || engine.page(&source, from, direction, max_lines, &filters))
            .await?;
        let (start, end) = match direction {
            Direction::Down => (start, signed(page.offset)),
            Direction::Up => (signed(page.offset), end),
        };
        return Ok(text_response(
            page.content,
            [
                (START_POSITION, start.to_string()),
                (END_POSITION, end.to_string()),
            ],
        ));
    }

    let keywords = FilterSet::new(req.locates());
    let from = match direction {
        Direction::Down => end,
        Direction::Up => start,
    };
    let located: Option<(u64, PageOutcome)> = blocking(move || {
        let result = engine.locate(&source, from, direction, &keywords)?;
        match result.offset() {
            Some(at) => engine
                .page(&source, signed(at), Direction::Down, max_lines, &filters)
                .map(|page| Some((at, page))),
            None => Ok(None),
        }
    })
    .await?;

    Ok(match located {
        Some((at, page)) => text_response(
            page.content,
            [
                (START_POSITION, at.to_string()),
                (END_POSITION, page.offset.to_string()),
                (LOCATE_FOUND, "true".to_string()),
            ],
        ),
        None => text_response(
            NOT_FOUND_BODY.as_bytes().to_vec(),
            [
                (START_POSITION, start.to_string()),
                (END_POSITION, end.to_string()),
                (LOCATE_FOUND, "false".to_string()),
            ],
        ),
    })
}
