pub mod fulfilment;
pub mod health;
pub mod warehouses;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Unwrap a JSON body, turning malformed or incomplete payloads into a
/// `VALIDATION_ERROR` response instead of axum's plain-text rejection.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::invalid(rejection.body_text()))
}

pub(crate) fn require_code(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::invalid(format!("{field} must not be blank")));
    }
    Ok(())
}
