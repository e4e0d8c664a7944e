//! Row types decoded by sqlx, converted into core domain types.

use chrono::{DateTime, Utc};
use fulfilment_core::types::{Assignment, Warehouse};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow)]
pub struct PgWarehouseRow {
    pub id: Uuid,
    pub business_unit_code: String,
    pub location: String,
    pub capacity: i32,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl From<PgWarehouseRow> for Warehouse {
    fn from(row: PgWarehouseRow) -> Self {
        Warehouse {
            id: row.id,
            business_unit_code: row.business_unit_code,
            location: row.location,
            capacity: row.capacity,
            stock: row.stock,
            created_at: row.created_at,
            archived_at: row.archived_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct PgAssignmentRow {
    pub id: Uuid,
    pub product_code: String,
    pub store_code: String,
    pub warehouse_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<PgAssignmentRow> for Assignment {
    fn from(row: PgAssignmentRow) -> Self {
        Assignment {
            id: row.id,
            product_code: row.product_code,
            store_code: row.store_code,
            warehouse_code: row.warehouse_code,
            created_at: row.created_at,
        }
    }
}
