//! Warehouse lifecycle service: create, archive, replace, and the reads the
//! REST surface needs.
//!
//! Each operation runs in one unit of work. Checks run in the documented
//! order and the first failure wins; nothing is written until every check
//! has passed.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::FulfilmentError;
use crate::ports::{LocationResolver, Result, StoreProvider, UnitOfWork};
use crate::types::{NewWarehouse, Warehouse};

pub struct WarehouseService {
    stores: Arc<dyn StoreProvider>,
    locations: Arc<dyn LocationResolver>,
}

impl WarehouseService {
    pub fn new(stores: Arc<dyn StoreProvider>, locations: Arc<dyn LocationResolver>) -> Self {
        Self { stores, locations }
    }

    /// All active warehouses, ordered by business unit code.
    pub async fn list_active(&self) -> Result<Vec<Warehouse>> {
        let mut uow = self.stores.begin().await?;
        let warehouses = uow.list_active().await?;
        uow.commit().await?;
        Ok(warehouses)
    }

    /// The active warehouse for `business_unit_code`.
    pub async fn get(&self, business_unit_code: &str) -> Result<Warehouse> {
        let mut uow = self.stores.begin().await?;
        let found = uow.find_by_business_unit_code(business_unit_code).await?;
        uow.commit().await?;
        match found {
            Some(warehouse) if !warehouse.is_archived() => Ok(warehouse),
            _ => Err(FulfilmentError::NotFound(business_unit_code.to_string())),
        }
    }

    pub async fn create(&self, new: NewWarehouse) -> Result<Warehouse> {
        let mut uow = self.stores.begin().await?;

        if uow
            .find_by_business_unit_code(&new.business_unit_code)
            .await?
            .is_some()
        {
            warn!(business_unit_code = %new.business_unit_code, "warehouse already exists");
            return Err(FulfilmentError::AlreadyExists(new.business_unit_code));
        }

        let location = self
            .locations
            .resolve_by_identifier(&new.location)
            .await?
            .ok_or_else(|| FulfilmentError::LocationNotFound(new.location.clone()))?;

        let at_location = uow.count_at_location(&new.location).await?;
        debug!(location = %new.location, at_location, "warehouses at location");
        if at_location >= u64::from(location.max_number_of_warehouses) {
            return Err(FulfilmentError::CapacityExceeded(format!(
                "Maximum warehouses reached for location: {}",
                new.location
            )));
        }

        if new.capacity > location.max_capacity {
            return Err(FulfilmentError::CapacityExceeded(format!(
                "Warehouse capacity ({}) exceeds location maximum capacity ({})",
                new.capacity, location.max_capacity
            )));
        }

        if new.stock > new.capacity {
            return Err(FulfilmentError::InvalidStock(format!(
                "Stock ({}) exceeds warehouse capacity ({})",
                new.stock, new.capacity
            )));
        }

        let warehouse = new.into_warehouse(Utc::now());
        uow.create_warehouse(&warehouse).await?;
        uow.commit().await?;

        info!(
            business_unit_code = %warehouse.business_unit_code,
            location = %warehouse.location,
            "warehouse created"
        );
        Ok(warehouse)
    }

    /// Archive an already-resolved warehouse record.
    ///
    /// Only the id is taken from `warehouse`; the archived state and every
    /// other field come from the stored record.
    pub async fn archive(&self, warehouse: Warehouse) -> Result<Warehouse> {
        let mut uow = self.stores.begin().await?;
        let archived = Self::archive_in(uow.as_mut(), &warehouse).await?;
        uow.commit().await?;
        Ok(archived)
    }

    /// Resolve `business_unit_code` and archive it in the same unit of work.
    pub async fn archive_by_code(&self, business_unit_code: &str) -> Result<Warehouse> {
        let mut uow = self.stores.begin().await?;
        let warehouse = uow
            .find_by_business_unit_code(business_unit_code)
            .await?
            .ok_or_else(|| FulfilmentError::NotFound(business_unit_code.to_string()))?;
        let archived = Self::archive_in(uow.as_mut(), &warehouse).await?;
        uow.commit().await?;
        Ok(archived)
    }

    async fn archive_in(uow: &mut dyn UnitOfWork, warehouse: &Warehouse) -> Result<Warehouse> {
        let mut stored = uow
            .find_by_id(warehouse.id)
            .await?
            .ok_or_else(|| FulfilmentError::NotFound(warehouse.business_unit_code.clone()))?;

        let now = Utc::now();
        if stored.is_archived() || !uow.archive_warehouse(stored.id, now).await? {
            warn!(business_unit_code = %stored.business_unit_code, "warehouse already archived");
            return Err(FulfilmentError::AlreadyArchived(stored.business_unit_code));
        }
        stored.archived_at = Some(now);

        info!(business_unit_code = %stored.business_unit_code, "warehouse archived");
        Ok(stored)
    }

    /// Replace the active warehouse `business_unit_code` with `new`.
    ///
    /// The replacement must carry the existing stock unchanged and have room
    /// for it. The predecessor is archived and the replacement created in one
    /// unit of work; the archive is written first so that a replacement
    /// reusing the code never meets a second active record.
    pub async fn replace(&self, business_unit_code: &str, new: NewWarehouse) -> Result<Warehouse> {
        let mut uow = self.stores.begin().await?;

        let existing = uow
            .find_by_business_unit_code(business_unit_code)
            .await?
            .ok_or_else(|| FulfilmentError::NotFound(business_unit_code.to_string()))?;
        if existing.is_archived() {
            return Err(FulfilmentError::AlreadyArchived(
                business_unit_code.to_string(),
            ));
        }

        if new.capacity < existing.stock {
            return Err(FulfilmentError::CapacityExceeded(format!(
                "New warehouse capacity ({}) cannot accommodate existing stock ({})",
                new.capacity, existing.stock
            )));
        }

        if new.stock != existing.stock {
            return Err(FulfilmentError::InvalidStock(format!(
                "New warehouse stock ({}) must match existing stock ({})",
                new.stock, existing.stock
            )));
        }

        let now = Utc::now();
        if !uow.archive_warehouse(existing.id, now).await? {
            return Err(FulfilmentError::AlreadyArchived(
                business_unit_code.to_string(),
            ));
        }

        let replacement = new.into_warehouse(now);
        uow.create_warehouse(&replacement).await?;
        uow.commit().await?;

        info!(
            replaced = %business_unit_code,
            replacement = %replacement.business_unit_code,
            "warehouse replaced"
        );
        Ok(replacement)
    }
}
