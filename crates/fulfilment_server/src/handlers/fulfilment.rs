//! POST /fulfilment — link a product to a warehouse for a store.

use std::sync::Arc;

use axum::extract::{rejection::JsonRejection, Extension};
use axum::http::StatusCode;
use axum::Json;
use fulfilment_core::types::Assignment;
use fulfilment_core::FulfilmentService;
use serde::Deserialize;

use super::{json_body, require_code};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfilmentRequest {
    pub product_code: String,
    pub store_code: String,
    pub warehouse_code: String,
}

impl FulfilmentRequest {
    /// Reject blank codes and strip surrounding whitespace, so `" P1"` and
    /// `"P1"` count as the same product.
    fn normalized(self) -> Result<Self, AppError> {
        require_code("productCode", &self.product_code)?;
        require_code("storeCode", &self.store_code)?;
        require_code("warehouseCode", &self.warehouse_code)?;
        Ok(Self {
            product_code: self.product_code.trim().to_string(),
            store_code: self.store_code.trim().to_string(),
            warehouse_code: self.warehouse_code.trim().to_string(),
        })
    }
}

pub async fn assign(
    Extension(service): Extension<Arc<FulfilmentService>>,
    payload: Result<Json<FulfilmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Assignment>), AppError> {
    let req = json_body(payload)?.normalized()?;

    let assignment = service
        .assign(&req.product_code, &req.store_code, &req.warehouse_code)
        .await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(product: &str, store: &str, warehouse: &str) -> FulfilmentRequest {
        FulfilmentRequest {
            product_code: product.into(),
            store_code: store.into(),
            warehouse_code: warehouse.into(),
        }
    }

    #[test]
    fn codes_are_trimmed() {
        let req = request(" P1", "S1 ", "\tMWH.001").normalized().unwrap();
        assert_eq!(req.product_code, "P1");
        assert_eq!(req.store_code, "S1");
        assert_eq!(req.warehouse_code, "MWH.001");
    }

    #[test]
    fn blank_code_rejected() {
        let err = request("P1", "S1", "  ").normalized().unwrap_err();
        assert!(err.0.to_string().contains("warehouseCode must not be blank"));
    }
}
