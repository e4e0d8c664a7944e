//! In-memory store.
//!
//! Backs the server when no database is configured, and the service tests.
//! A unit of work holds the state lock for its whole lifetime, so
//! transactions are serialised. Writes go to a staged copy that replaces the
//! shared state only on commit.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::error::FulfilmentError;
use crate::ports::{AssignmentStore, Result, StoreProvider, UnitOfWork, WarehouseStore};
use crate::types::{Assignment, Warehouse};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    assignments: Vec<Assignment>,
    warehouses: Vec<Warehouse>,
}

/// Shared in-memory state handing out serialised units of work.
#[derive(Clone, Default)]
pub struct MemoryStores {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given warehouse records already persisted.
    pub fn with_warehouses(warehouses: Vec<Warehouse>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                assignments: Vec::new(),
                warehouses,
            })),
        }
    }

    pub async fn assignments(&self) -> Vec<Assignment> {
        self.state.lock().await.assignments.clone()
    }

    /// Every warehouse record, archived ones included, in insertion order.
    pub async fn warehouses(&self) -> Vec<Warehouse> {
        self.state.lock().await.warehouses.clone()
    }
}

#[async_trait]
impl StoreProvider for MemoryStores {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = (*guard).clone();
        Ok(Box::new(MemoryUnitOfWork { guard, staged }))
    }
}

struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
}

#[async_trait]
impl AssignmentStore for MemoryUnitOfWork {
    async fn count_for_product_and_store(
        &mut self,
        product_code: &str,
        store_code: &str,
    ) -> Result<u64> {
        let count = self
            .staged
            .assignments
            .iter()
            .filter(|a| a.product_code == product_code && a.store_code == store_code)
            .count();
        Ok(count as u64)
    }

    async fn count_distinct_warehouses_for_store(&mut self, store_code: &str) -> Result<u64> {
        let distinct: BTreeSet<&str> = self
            .staged
            .assignments
            .iter()
            .filter(|a| a.store_code == store_code)
            .map(|a| a.warehouse_code.as_str())
            .collect();
        Ok(distinct.len() as u64)
    }

    async fn store_has_warehouse(
        &mut self,
        store_code: &str,
        warehouse_code: &str,
    ) -> Result<bool> {
        Ok(self
            .staged
            .assignments
            .iter()
            .any(|a| a.store_code == store_code && a.warehouse_code == warehouse_code))
    }

    async fn count_distinct_products_for_warehouse(
        &mut self,
        warehouse_code: &str,
    ) -> Result<u64> {
        let distinct: BTreeSet<&str> = self
            .staged
            .assignments
            .iter()
            .filter(|a| a.warehouse_code == warehouse_code)
            .map(|a| a.product_code.as_str())
            .collect();
        Ok(distinct.len() as u64)
    }

    async fn insert_assignment(&mut self, assignment: &Assignment) -> Result<()> {
        if self
            .staged
            .assignments
            .iter()
            .any(|existing| existing.same_triple(assignment))
        {
            return Err(FulfilmentError::DuplicateAssignment {
                product_code: assignment.product_code.clone(),
                store_code: assignment.store_code.clone(),
                warehouse_code: assignment.warehouse_code.clone(),
            });
        }
        self.staged.assignments.push(assignment.clone());
        Ok(())
    }
}

#[async_trait]
impl WarehouseStore for MemoryUnitOfWork {
    async fn find_by_business_unit_code(
        &mut self,
        business_unit_code: &str,
    ) -> Result<Option<Warehouse>> {
        let mut matching: Vec<&Warehouse> = self
            .staged
            .warehouses
            .iter()
            .filter(|w| w.business_unit_code == business_unit_code)
            .collect();
        if let Some(active) = matching.iter().find(|w| !w.is_archived()) {
            return Ok(Some((*active).clone()));
        }
        matching.sort_by_key(|w| w.created_at);
        Ok(matching.last().map(|w| (*w).clone()))
    }

    async fn find_by_id(&mut self, id: Uuid) -> Result<Option<Warehouse>> {
        Ok(self.staged.warehouses.iter().find(|w| w.id == id).cloned())
    }

    async fn list_active(&mut self) -> Result<Vec<Warehouse>> {
        let mut active: Vec<Warehouse> = self
            .staged
            .warehouses
            .iter()
            .filter(|w| !w.is_archived())
            .cloned()
            .collect();
        active.sort_by(|a, b| a.business_unit_code.cmp(&b.business_unit_code));
        Ok(active)
    }

    async fn count_at_location(&mut self, location: &str) -> Result<u64> {
        let count = self
            .staged
            .warehouses
            .iter()
            .filter(|w| w.location == location)
            .count();
        Ok(count as u64)
    }

    async fn create_warehouse(&mut self, warehouse: &Warehouse) -> Result<()> {
        let clashes = self.staged.warehouses.iter().any(|w| {
            w.business_unit_code == warehouse.business_unit_code && !w.is_archived()
        });
        if clashes && !warehouse.is_archived() {
            return Err(FulfilmentError::AlreadyExists(
                warehouse.business_unit_code.clone(),
            ));
        }
        self.staged.warehouses.push(warehouse.clone());
        Ok(())
    }

    async fn archive_warehouse(&mut self, id: Uuid, archived_at: DateTime<Utc>) -> Result<bool> {
        match self
            .staged
            .warehouses
            .iter_mut()
            .find(|w| w.id == id && !w.is_archived())
        {
            Some(active) => {
                active.archived_at = Some(archived_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryUnitOfWork { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}
