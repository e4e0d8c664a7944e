//! Warehouse lifecycle endpoints.
//!
//! GET    /warehouse                     — active warehouses
//! GET    /warehouse/:code               — one active warehouse
//! POST   /warehouse                     — create
//! DELETE /warehouse/:code               — archive
//! POST   /warehouse/:code/replacement   — replace

use std::sync::Arc;

use axum::extract::{rejection::JsonRejection, Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use fulfilment_core::types::{NewWarehouse, Warehouse};
use fulfilment_core::WarehouseService;
use serde::{Deserialize, Serialize};

use super::{json_body, require_code};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseRequest {
    pub business_unit_code: String,
    pub location: String,
    pub capacity: i32,
    pub stock: i32,
}

impl WarehouseRequest {
    fn into_new_warehouse(self) -> Result<NewWarehouse, AppError> {
        require_code("businessUnitCode", &self.business_unit_code)?;
        require_code("location", &self.location)?;
        if self.capacity < 0 {
            return Err(AppError::invalid("capacity must not be negative"));
        }
        if self.stock < 0 {
            return Err(AppError::invalid("stock must not be negative"));
        }
        Ok(NewWarehouse::new(
            self.business_unit_code.trim(),
            self.location.trim(),
            self.capacity,
            self.stock,
        ))
    }
}

/// Wire shape of a warehouse. The surrogate id stays internal.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseResponse {
    pub business_unit_code: String,
    pub location: String,
    pub capacity: i32,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

impl From<Warehouse> for WarehouseResponse {
    fn from(w: Warehouse) -> Self {
        Self {
            business_unit_code: w.business_unit_code,
            location: w.location,
            capacity: w.capacity,
            stock: w.stock,
            created_at: w.created_at,
            archived_at: w.archived_at,
        }
    }
}

pub async fn list(
    Extension(service): Extension<Arc<WarehouseService>>,
) -> Result<Json<Vec<WarehouseResponse>>, AppError> {
    let warehouses = service.list_active().await?;
    Ok(Json(warehouses.into_iter().map(Into::into).collect()))
}

pub async fn get(
    Extension(service): Extension<Arc<WarehouseService>>,
    Path(business_unit_code): Path<String>,
) -> Result<Json<WarehouseResponse>, AppError> {
    let warehouse = service.get(&business_unit_code).await?;
    Ok(Json(warehouse.into()))
}

pub async fn create(
    Extension(service): Extension<Arc<WarehouseService>>,
    payload: Result<Json<WarehouseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WarehouseResponse>), AppError> {
    let new = json_body(payload)?.into_new_warehouse()?;
    let created = service.create(new).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn archive(
    Extension(service): Extension<Arc<WarehouseService>>,
    Path(business_unit_code): Path<String>,
) -> Result<StatusCode, AppError> {
    service.archive_by_code(&business_unit_code).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn replace(
    Extension(service): Extension<Arc<WarehouseService>>,
    Path(business_unit_code): Path<String>,
    payload: Result<Json<WarehouseRequest>, JsonRejection>,
) -> Result<Json<WarehouseResponse>, AppError> {
    let new = json_body(payload)?.into_new_warehouse()?;
    let replacement = service.replace(&business_unit_code, new).await?;
    Ok(Json(replacement.into()))
}
