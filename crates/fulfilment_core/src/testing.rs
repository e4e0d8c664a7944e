//! Scripted store double: fixed query answers, recorded calls.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::ports::{AssignmentStore, Result, StoreProvider, UnitOfWork, WarehouseStore};
use crate::types::{Assignment, Warehouse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CountForProductAndStore(String, String),
    CountDistinctWarehousesForStore(String),
    StoreHasWarehouse(String, String),
    CountDistinctProductsForWarehouse(String),
    InsertAssignment(String, String, String),
    FindByBusinessUnitCode(String),
    FindById(Uuid),
    ListActive,
    CountAtLocation(String),
    CreateWarehouse(String),
    ArchiveWarehouse(Uuid),
}

#[derive(Default)]
struct Log {
    calls: Vec<Call>,
    committed: bool,
}

#[derive(Clone, Default)]
struct Script {
    product_count: u64,
    store_count: u64,
    warehouse_count: u64,
    location_count: u64,
    existing: Option<Warehouse>,
}

#[derive(Default)]
pub struct ScriptedStores {
    script: Script,
    log: Arc<Mutex<Log>>,
}

impl ScriptedStores {
    pub fn with_product_count(mut self, count: u64) -> Self {
        self.script.product_count = count;
        self
    }

    pub fn with_store_count(mut self, count: u64) -> Self {
        self.script.store_count = count;
        self
    }

    pub fn with_warehouse_count(mut self, count: u64) -> Self {
        self.script.warehouse_count = count;
        self
    }

    pub fn with_location_count(mut self, count: u64) -> Self {
        self.script.location_count = count;
        self
    }

    pub fn with_existing(mut self, warehouse: Warehouse) -> Self {
        self.script.existing = Some(warehouse);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().calls.clone()
    }

    pub fn committed(&self) -> bool {
        self.log.lock().unwrap().committed
    }
}

#[async_trait]
impl StoreProvider for ScriptedStores {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        Ok(Box::new(ScriptedUnitOfWork {
            script: self.script.clone(),
            log: Arc::clone(&self.log),
        }))
    }
}

struct ScriptedUnitOfWork {
    script: Script,
    log: Arc<Mutex<Log>>,
}

impl ScriptedUnitOfWork {
    fn record(&self, call: Call) {
        self.log.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl AssignmentStore for ScriptedUnitOfWork {
    async fn count_for_product_and_store(
        &mut self,
        product_code: &str,
        store_code: &str,
    ) -> Result<u64> {
        self.record(Call::CountForProductAndStore(
            product_code.into(),
            store_code.into(),
        ));
        Ok(self.script.product_count)
    }

    async fn count_distinct_warehouses_for_store(&mut self, store_code: &str) -> Result<u64> {
        self.record(Call::CountDistinctWarehousesForStore(store_code.into()));
        Ok(self.script.store_count)
    }

    async fn store_has_warehouse(
        &mut self,
        store_code: &str,
        warehouse_code: &str,
    ) -> Result<bool> {
        self.record(Call::StoreHasWarehouse(
            store_code.into(),
            warehouse_code.into(),
        ));
        Ok(false)
    }

    async fn count_distinct_products_for_warehouse(
        &mut self,
        warehouse_code: &str,
    ) -> Result<u64> {
        self.record(Call::CountDistinctProductsForWarehouse(warehouse_code.into()));
        Ok(self.script.warehouse_count)
    }

    async fn insert_assignment(&mut self, assignment: &Assignment) -> Result<()> {
        self.record(Call::InsertAssignment(
            assignment.product_code.clone(),
            assignment.store_code.clone(),
            assignment.warehouse_code.clone(),
        ));
        Ok(())
    }
}

#[async_trait]
impl WarehouseStore for ScriptedUnitOfWork {
    async fn find_by_business_unit_code(
        &mut self,
        business_unit_code: &str,
    ) -> Result<Option<Warehouse>> {
        self.record(Call::FindByBusinessUnitCode(business_unit_code.into()));
        Ok(self.script.existing.clone())
    }

    async fn find_by_id(&mut self, id: Uuid) -> Result<Option<Warehouse>> {
        self.record(Call::FindById(id));
        Ok(self.script.existing.clone().filter(|w| w.id == id))
    }

    async fn list_active(&mut self) -> Result<Vec<Warehouse>> {
        self.record(Call::ListActive);
        Ok(self.script.existing.clone().into_iter().collect())
    }

    async fn count_at_location(&mut self, location: &str) -> Result<u64> {
        self.record(Call::CountAtLocation(location.into()));
        Ok(self.script.location_count)
    }

    async fn create_warehouse(&mut self, warehouse: &Warehouse) -> Result<()> {
        self.record(Call::CreateWarehouse(warehouse.business_unit_code.clone()));
        Ok(())
    }

    async fn archive_warehouse(&mut self, id: Uuid, _archived_at: DateTime<Utc>) -> Result<bool> {
        self.record(Call::ArchiveWarehouse(id));
        Ok(self
            .script
            .existing
            .as_ref()
            .is_some_and(|w| w.id == id && !w.is_archived()))
    }
}

#[async_trait]
impl UnitOfWork for ScriptedUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.log.lock().unwrap().committed = true;
        Ok(())
    }
}
