//! Postgres implementation of the fulfilment_core store ports.
//!
//! A unit of work wraps one `sqlx::Transaction`; dropping it without
//! `commit` rolls back. All SQL is runtime-checked (sqlx::query, not
//! sqlx::query!) to avoid a compile-time DB requirement.

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use fulfilment_core::error::FulfilmentError;
use fulfilment_core::ports::{AssignmentStore, Result, StoreProvider, UnitOfWork, WarehouseStore};
use fulfilment_core::types::{Assignment, Warehouse};

use crate::sqlx_types::{PgAssignmentRow, PgWarehouseRow};

const WAREHOUSE_COLUMNS: &str =
    "id, business_unit_code, location, capacity, stock, created_at, archived_at";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

// ── PgStores ──────────────────────────────────────────────────

/// Postgres-backed store provider. Each `begin` opens a transaction on the pool.
#[derive(Clone)]
pub struct PgStores {
    pool: PgPool,
}

impl PgStores {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All assignments for a store, oldest first.
    pub async fn assignments_for_store(&self, store_code: &str) -> Result<Vec<Assignment>> {
        let rows = sqlx::query_as::<_, PgAssignmentRow>(
            r#"
            SELECT id, product_code, store_code, warehouse_code, created_at
            FROM fulfilment_assignment
            WHERE store_code = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(store_code)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(rows.into_iter().map(Assignment::from).collect())
    }

    /// Every record carrying the business unit code, archived ones included.
    pub async fn warehouse_history(&self, business_unit_code: &str) -> Result<Vec<Warehouse>> {
        let rows = sqlx::query_as::<_, PgWarehouseRow>(&format!(
            "SELECT {WAREHOUSE_COLUMNS} FROM warehouse WHERE business_unit_code = $1 ORDER BY created_at"
        ))
        .bind(business_unit_code)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(rows.into_iter().map(Warehouse::from).collect())
    }
}

#[async_trait]
impl StoreProvider for PgStores {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin().await.map_err(|e| anyhow!(e))?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }
}

// ── PgUnitOfWork ──────────────────────────────────────────────

pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl AssignmentStore for PgUnitOfWork {
    async fn count_for_product_and_store(
        &mut self,
        product_code: &str,
        store_code: &str,
    ) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM fulfilment_assignment
            WHERE product_code = $1
              AND store_code = $2
            "#,
        )
        .bind(product_code)
        .bind(store_code)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(count as u64)
    }

    async fn count_distinct_warehouses_for_store(&mut self, store_code: &str) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT warehouse_code)
            FROM fulfilment_assignment
            WHERE store_code = $1
            "#,
        )
        .bind(store_code)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(count as u64)
    }

    async fn store_has_warehouse(
        &mut self,
        store_code: &str,
        warehouse_code: &str,
    ) -> Result<bool> {
        let linked = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM fulfilment_assignment
                WHERE store_code = $1
                  AND warehouse_code = $2
            )
            "#,
        )
        .bind(store_code)
        .bind(warehouse_code)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(linked)
    }

    async fn count_distinct_products_for_warehouse(
        &mut self,
        warehouse_code: &str,
    ) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT product_code)
            FROM fulfilment_assignment
            WHERE warehouse_code = $1
            "#,
        )
        .bind(warehouse_code)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(count as u64)
    }

    async fn insert_assignment(&mut self, assignment: &Assignment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO fulfilment_assignment (
                id, product_code, store_code, warehouse_code, created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(assignment.id)
        .bind(&assignment.product_code)
        .bind(&assignment.store_code)
        .bind(&assignment.warehouse_code)
        .bind(assignment.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                FulfilmentError::DuplicateAssignment {
                    product_code: assignment.product_code.clone(),
                    store_code: assignment.store_code.clone(),
                    warehouse_code: assignment.warehouse_code.clone(),
                }
            } else {
                FulfilmentError::Internal(anyhow!(e))
            }
        })?;
        Ok(())
    }
}

#[async_trait]
impl WarehouseStore for PgUnitOfWork {
    async fn find_by_business_unit_code(
        &mut self,
        business_unit_code: &str,
    ) -> Result<Option<Warehouse>> {
        let row = sqlx::query_as::<_, PgWarehouseRow>(&format!(
            r#"
            SELECT {WAREHOUSE_COLUMNS}
            FROM warehouse
            WHERE business_unit_code = $1
            ORDER BY (archived_at IS NULL) DESC, created_at DESC
            LIMIT 1
            "#
        ))
        .bind(business_unit_code)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(row.map(Warehouse::from))
    }

    async fn find_by_id(&mut self, id: Uuid) -> Result<Option<Warehouse>> {
        let row = sqlx::query_as::<_, PgWarehouseRow>(&format!(
            "SELECT {WAREHOUSE_COLUMNS} FROM warehouse WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(row.map(Warehouse::from))
    }

    async fn list_active(&mut self) -> Result<Vec<Warehouse>> {
        let rows = sqlx::query_as::<_, PgWarehouseRow>(&format!(
            r#"
            SELECT {WAREHOUSE_COLUMNS}
            FROM warehouse
            WHERE archived_at IS NULL
            ORDER BY business_unit_code
            "#
        ))
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(rows.into_iter().map(Warehouse::from).collect())
    }

    async fn count_at_location(&mut self, location: &str) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM warehouse
            WHERE location = $1
            "#,
        )
        .bind(location)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(count as u64)
    }

    async fn create_warehouse(&mut self, warehouse: &Warehouse) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO warehouse (
                id, business_unit_code, location, capacity, stock, created_at, archived_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(warehouse.id)
        .bind(&warehouse.business_unit_code)
        .bind(&warehouse.location)
        .bind(warehouse.capacity)
        .bind(warehouse.stock)
        .bind(warehouse.created_at)
        .bind(warehouse.archived_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                FulfilmentError::AlreadyExists(warehouse.business_unit_code.clone())
            } else {
                FulfilmentError::Internal(anyhow!(e))
            }
        })?;
        Ok(())
    }

    async fn archive_warehouse(&mut self, id: Uuid, archived_at: DateTime<Utc>) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE warehouse
            SET archived_at = $2
            WHERE id = $1 AND archived_at IS NULL
            "#,
        )
        .bind(id)
        .bind(archived_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(|e| anyhow!(e))?;
        Ok(())
    }
}
