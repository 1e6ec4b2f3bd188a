use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tokio::time::{timeout, Duration};
use tracing::error;

use backend_application::AppState;

use crate::middleware::authorize;

#[derive(serde::Serialize)]
struct AlertTargetStatus {
    status: String,
    configured: bool,
}

fn alert_target_response(status: StatusCode, label: &str, configured: bool) -> axum::response::Response {
    (
        status,
        Json(AlertTargetStatus {
            status: label.to_string(),
            configured,
        }),
    )
        .into_response()
}

pub async fn alert_target_check(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let configured = state.config.alert_webhook_url.is_some();
    if !authorize(&state.config, &headers) {
        return alert_target_response(StatusCode::UNAUTHORIZED, "unauthorized", configured);
    }

    let timeout_secs = state.config.request_timeout_seconds.max(1);
    match timeout(Duration::from_secs(timeout_secs), state.health.check_alert_target()).await {
        Ok(Ok(_)) => alert_target_response(StatusCode::OK, "ok", configured),
        Ok(Err(err)) => {
            error!("alert target check failed: {}", err);
            alert_target_response(StatusCode::SERVICE_UNAVAILABLE, "error", configured)
        }
        Err(_) => {
            error!("alert target check timeout after {}s", timeout_secs);
            alert_target_response(StatusCode::SERVICE_UNAVAILABLE, "timeout", configured)
        }
    }
}

pub async fn health_live() -> StatusCode {
    StatusCode::OK
}

pub async fn health_ready(State(state): State<AppState>, headers: HeaderMap) -> StatusCode {
    if !authorize(&state.config, &headers) {
        return StatusCode::UNAUTHORIZED;
    }
    let timeout_secs = state.config.request_timeout_seconds.max(1);
    match timeout(Duration::from_secs(timeout_secs), state.health.check_datastore()).await {
        Ok(Ok(_)) => StatusCode::OK,
        Ok(Err(err)) => {
            error!("ready check failed: {}", err);
            StatusCode::SERVICE_UNAVAILABLE
        }
        Err(_) => {
            error!("ready check timeout after {}s", timeout_secs);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub async fn metrics_prometheus(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorize(&state.config, &headers) {
        return (StatusCode::UNAUTHORIZED, "unauthorized".to_string()).into_response();
    }
    let payload = state.metrics.render_prometheus();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    (headers, payload).into_response()
}
