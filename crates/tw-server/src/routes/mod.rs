//! API route definitions and router builder.

pub mod health;
pub mod locate;
pub mod logs;
pub mod tail;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tw_log_engine::LogError;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Build the Axum router with all routes and middleware, nested under
/// `context_path` when it is non-empty.
pub fn build_router(state: AppState, context_path: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    let api = Router::new()
        .route("/health", get(health::health))
        .route("/logs", get(logs::list_logs))
        // Query string on GET, form body on POST.
        .route("/tail", get(tail::tail).post(tail::tail))
        .route("/locate", get(locate::locate).post(locate::locate));

    let app = if context_path.is_empty() {
        api
    } else {
        Router::new().nest(context_path, api)
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Run a blocking engine call on the blocking pool.
pub(crate) async fn blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> Result<T, LogError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("engine task failed: {e}")))?
        .map_err(ApiError::from)
}

/// Plain-text body plus position headers.
pub(crate) fn text_response<const N: usize>(
    body: Vec<u8>,
    headers: [(&'static str, String); N],
) -> Response {
    let mut response = (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response();
    for (name, value) in headers {
        if let Ok(value) = HeaderValue::from_str(&value) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(name), value);
        }
    }
    response
}

/// Engine offsets are `u64`; the wire carries signed values.
pub(crate) fn signed(offset: u64) -> i64 {
    i64::try_from(offset).unwrap_or(i64::MAX)
}
