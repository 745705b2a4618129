use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::app::AppState;

/// Warns about requests slower than `api.slow_request_threshold_ms`
pub async fn request_time_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    if elapsed_ms > state.config.api.slow_request_threshold_ms {
        warn!("Request [{}] at {} took {} ms", method, path, elapsed_ms);
    } else if state.config.api.enable_request_logging {
        debug!("{} {} -> {} in {} ms", method, path, response.status(), elapsed_ms);
    }

    response
}
