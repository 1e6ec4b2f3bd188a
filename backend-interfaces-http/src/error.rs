use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use backend_application::AppError;

#[derive(Debug)]
pub enum HttpError {
    Unauthorized,
    NotFound(String),
    BadGateway(String),
    Internal(String),
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::NotFound(what) => HttpError::NotFound(what),
            AppError::Datastore(err) => HttpError::BadGateway(err.to_string()),
            AppError::Internal(err) => HttpError::Internal(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            HttpError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            HttpError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, format!("datastore unavailable: {}", msg)),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn status_of(err: AppError) -> StatusCode {
        HttpError::from(err).into_response().status()
    }

    #[test]
    fn maps_application_errors_to_status_codes() {
        assert_eq!(status_of(AppError::NotFound("sale 'x'".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::Datastore(anyhow!("down"))), StatusCode::BAD_GATEWAY);
        assert_eq!(status_of(AppError::Internal(anyhow!("boom"))), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(HttpError::Unauthorized.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
