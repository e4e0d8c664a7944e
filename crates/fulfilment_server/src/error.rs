//! Maps `FulfilmentError` onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use fulfilment_core::FulfilmentError;
use serde::{Deserialize, Serialize};

const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

/// Error body returned for every rejected request.
///
/// `path` is empty when built; the `error_path` middleware fills it in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub status: u16,
    pub timestamp: DateTime<Utc>,
    pub path: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            status: status.as_u16(),
            timestamp: Utc::now(),
            path: String::new(),
        }
    }
}

#[derive(Debug)]
pub struct AppError(pub FulfilmentError);

impl AppError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self(FulfilmentError::InvalidInput(message.into()))
    }
}

impl From<FulfilmentError> for AppError {
    fn from(err: FulfilmentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_internal() {
            tracing::error!(error = ?self.0, "request failed");
            INTERNAL_MESSAGE.to_string()
        } else {
            tracing::debug!(code = self.0.code(), "request rejected: {}", self.0);
            self.0.to_string()
        };

        let body = ApiError::new(self.0.code(), message, status);
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError(FulfilmentError::NotFound("MWH.404".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.extensions().get::<ApiError>().unwrap();
        assert_eq!(body.code, "WAREHOUSE_NOT_FOUND");
        assert_eq!(body.status, 404);
        assert!(body.message.contains("MWH.404"));
    }

    #[test]
    fn internal_detail_is_hidden() {
        let err = FulfilmentError::Internal(anyhow::anyhow!("connection refused to 10.0.0.7"));
        let response = AppError(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.extensions().get::<ApiError>().unwrap();
        assert_eq!(body.code, "INTERNAL_SERVER_ERROR");
        assert_eq!(body.message, INTERNAL_MESSAGE);
    }

    #[test]
    fn invalid_input_is_a_validation_error() {
        let response = AppError::invalid("capacity must not be negative").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.extensions().get::<ApiError>().unwrap();
        assert_eq!(body.code, "VALIDATION_ERROR");
    }
}
