//! Storage port traits.
//! Implemented by fulfilment_postgres (and `memory` for tests and local runs);
//! service logic depends only on these traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::FulfilmentError;
use crate::types::{Assignment, Location, Warehouse};

pub type Result<T> = std::result::Result<T, FulfilmentError>;

/// Assignment queries and writes, scoped to one unit of work.
#[async_trait]
pub trait AssignmentStore: Send {
    /// Number of assignments for this (product, store) pair.
    async fn count_for_product_and_store(
        &mut self,
        product_code: &str,
        store_code: &str,
    ) -> Result<u64>;

    /// Number of distinct warehouse codes assigned to the store.
    async fn count_distinct_warehouses_for_store(&mut self, store_code: &str) -> Result<u64>;

    /// Whether any assignment already links the warehouse to the store.
    async fn store_has_warehouse(&mut self, store_code: &str, warehouse_code: &str)
        -> Result<bool>;

    /// Number of distinct product codes assigned to the warehouse.
    async fn count_distinct_products_for_warehouse(&mut self, warehouse_code: &str)
        -> Result<u64>;

    /// Insert a new assignment. A repeated (product, store, warehouse) triple
    /// fails with `FulfilmentError::DuplicateAssignment`.
    async fn insert_assignment(&mut self, assignment: &Assignment) -> Result<()>;
}

/// Warehouse queries and writes, scoped to one unit of work.
#[async_trait]
pub trait WarehouseStore: Send {
    /// The active warehouse with this code, else the most recently created
    /// archived one, else `None`.
    async fn find_by_business_unit_code(&mut self, business_unit_code: &str)
        -> Result<Option<Warehouse>>;

    /// The record with this id, archived or not.
    async fn find_by_id(&mut self, id: Uuid) -> Result<Option<Warehouse>>;

    /// All active warehouses, ordered by business unit code.
    async fn list_active(&mut self) -> Result<Vec<Warehouse>>;

    /// Number of warehouse records at the location, archived ones included.
    async fn count_at_location(&mut self, location: &str) -> Result<u64>;

    /// Insert a new record. A second active record with the same business
    /// unit code fails with `FulfilmentError::AlreadyExists`.
    async fn create_warehouse(&mut self, warehouse: &Warehouse) -> Result<()>;

    /// Set `archived_at` on the record with `id` if it is still active.
    /// Returns `false` when no active record with that id exists; no other
    /// column is ever written.
    async fn archive_warehouse(&mut self, id: Uuid, archived_at: DateTime<Utc>) -> Result<bool>;
}

/// One transaction spanning every store call of a service operation.
///
/// Dropping a unit of work without calling `commit` discards its writes.
#[async_trait]
pub trait UnitOfWork: AssignmentStore + WarehouseStore {
    async fn commit(self: Box<Self>) -> Result<()>;
}

/// Source of units of work.
#[async_trait]
pub trait StoreProvider: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>>;
}

/// Read-only lookup of location capacity constraints.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn resolve_by_identifier(&self, identifier: &str) -> Result<Option<Location>>;
}
