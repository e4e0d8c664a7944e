//! Core domain types for fulfilment and warehouse management.
//! Pure value types with no sqlx or DB dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Assignments ───────────────────────────────────────────────

/// A fulfilment relationship: `warehouse_code` fulfils `product_code` for `store_code`.
/// Invariant: the (product, store, warehouse) triple is unique across all assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Uuid,
    pub product_code: String,
    pub store_code: String,
    pub warehouse_code: String,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    pub fn new(
        product_code: impl Into<String>,
        store_code: impl Into<String>,
        warehouse_code: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_code: product_code.into(),
            store_code: store_code.into(),
            warehouse_code: warehouse_code.into(),
            created_at,
        }
    }

    /// True when both assignments link the same product, store and warehouse.
    pub fn same_triple(&self, other: &Assignment) -> bool {
        self.product_code == other.product_code
            && self.store_code == other.store_code
            && self.warehouse_code == other.warehouse_code
    }
}

// ── Warehouses ────────────────────────────────────────────────

/// Lifecycle state of a warehouse. The only transition is `Active -> Archived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarehouseState {
    Active,
    Archived,
}

/// Caller-supplied warehouse definition, used by create and replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWarehouse {
    pub business_unit_code: String,
    pub location: String,
    pub capacity: i32,
    pub stock: i32,
}

impl NewWarehouse {
    pub fn new(
        business_unit_code: impl Into<String>,
        location: impl Into<String>,
        capacity: i32,
        stock: i32,
    ) -> Self {
        Self {
            business_unit_code: business_unit_code.into(),
            location: location.into(),
            capacity,
            stock,
        }
    }

    /// Stamp identity and creation time, producing an active record.
    pub fn into_warehouse(self, created_at: DateTime<Utc>) -> Warehouse {
        Warehouse {
            id: Uuid::new_v4(),
            business_unit_code: self.business_unit_code,
            location: self.location,
            capacity: self.capacity,
            stock: self.stock,
            created_at,
            archived_at: None,
        }
    }
}

/// A persisted warehouse record.
///
/// `business_unit_code` is unique among active records only: a replacement
/// usually reuses the code of the warehouse it archives, so `id` is the row identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: Uuid,
    pub business_unit_code: String,
    pub location: String,
    pub capacity: i32,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl Warehouse {
    pub fn state(&self) -> WarehouseState {
        if self.archived_at.is_some() {
            WarehouseState::Archived
        } else {
            WarehouseState::Active
        }
    }

    pub fn is_archived(&self) -> bool {
        self.state() == WarehouseState::Archived
    }
}

// ── Locations ─────────────────────────────────────────────────

/// Capacity constraints governing a site. Read-only; never owned by this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub identifier: String,
    pub max_number_of_warehouses: u32,
    pub max_capacity: i32,
}

impl Location {
    pub fn new(identifier: impl Into<String>, max_number_of_warehouses: u32, max_capacity: i32) -> Self {
        Self {
            identifier: identifier.into(),
            max_number_of_warehouses,
            max_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_warehouse_becomes_active_record() {
        let now = Utc::now();
        let warehouse = NewWarehouse::new("MWH.100", "AMSTERDAM-001", 80, 20).into_warehouse(now);
        assert_eq!(warehouse.business_unit_code, "MWH.100");
        assert_eq!(warehouse.created_at, now);
        assert_eq!(warehouse.state(), WarehouseState::Active);
    }

    #[test]
    fn archived_at_drives_state() {
        let mut warehouse = NewWarehouse::new("MWH.100", "AMSTERDAM-001", 80, 20)
            .into_warehouse(Utc::now());
        warehouse.archived_at = Some(Utc::now());
        assert!(warehouse.is_archived());
    }

    #[test]
    fn same_triple_ignores_identity_and_time() {
        let a = Assignment::new("P1", "S1", "W1", Utc::now());
        let b = Assignment::new("P1", "S1", "W1", Utc::now());
        let c = Assignment::new("P1", "S1", "W2", Utc::now());
        assert_ne!(a.id, b.id);
        assert!(a.same_triple(&b));
        assert!(!a.same_triple(&c));
    }

    #[test]
    fn warehouse_serializes_camel_case() {
        let warehouse = NewWarehouse::new("MWH.100", "AMSTERDAM-001", 80, 20)
            .into_warehouse(Utc::now());
        let json = serde_json::to_value(&warehouse).unwrap();
        assert_eq!(json["businessUnitCode"], "MWH.100");
        assert!(json["archivedAt"].is_null());
    }
}
