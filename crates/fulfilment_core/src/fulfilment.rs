//! Fulfilment assignment service.
//!
//! Assigning a warehouse to a (product, store) pair is gated by three limits,
//! evaluated in a fixed order. The first failing check short-circuits; later
//! checks never query the store.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::FulfilmentError;
use crate::ports::{Result, StoreProvider};
use crate::types::Assignment;

/// Upper bounds enforced before an assignment is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfilmentLimits {
    /// Warehouses that may fulfil one product for one store.
    pub max_warehouses_per_product: u64,
    /// Distinct warehouses that may fulfil one store.
    pub max_warehouses_per_store: u64,
    /// Distinct products one warehouse may hold.
    pub max_products_per_warehouse: u64,
}

impl Default for FulfilmentLimits {
    fn default() -> Self {
        Self {
            max_warehouses_per_product: 2,
            max_warehouses_per_store: 3,
            max_products_per_warehouse: 5,
        }
    }
}

pub struct FulfilmentService {
    stores: Arc<dyn StoreProvider>,
    limits: FulfilmentLimits,
}

impl FulfilmentService {
    pub fn new(stores: Arc<dyn StoreProvider>) -> Self {
        Self {
            stores,
            limits: FulfilmentLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: FulfilmentLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> FulfilmentLimits {
        self.limits
    }

    /// Link `warehouse_code` to (`product_code`, `store_code`).
    ///
    /// A repeated triple is not checked here; the store rejects it with
    /// `DuplicateAssignment`.
    pub async fn assign(
        &self,
        product_code: &str,
        store_code: &str,
        warehouse_code: &str,
    ) -> Result<Assignment> {
        let mut uow = self.stores.begin().await?;

        let per_product = uow
            .count_for_product_and_store(product_code, store_code)
            .await?;
        debug!(product_code, store_code, per_product, "product/store assignment count");
        if per_product >= self.limits.max_warehouses_per_product {
            warn!(product_code, store_code, "product fulfilment limit reached");
            return Err(FulfilmentError::ProductLimitExceeded {
                product_code: product_code.to_string(),
                store_code: store_code.to_string(),
                limit: self.limits.max_warehouses_per_product,
            });
        }

        let per_store = uow.count_distinct_warehouses_for_store(store_code).await?;
        debug!(store_code, per_store, "distinct warehouses for store");
        if per_store >= self.limits.max_warehouses_per_store
            && !uow.store_has_warehouse(store_code, warehouse_code).await?
        {
            warn!(store_code, "store fulfilment limit reached");
            return Err(FulfilmentError::StoreLimitExceeded {
                store_code: store_code.to_string(),
                limit: self.limits.max_warehouses_per_store,
            });
        }

        let per_warehouse = uow
            .count_distinct_products_for_warehouse(warehouse_code)
            .await?;
        debug!(warehouse_code, per_warehouse, "distinct products for warehouse");
        if per_warehouse >= self.limits.max_products_per_warehouse {
            warn!(warehouse_code, "warehouse product limit reached");
            return Err(FulfilmentError::WarehouseLimitExceeded {
                warehouse_code: warehouse_code.to_string(),
                limit: self.limits.max_products_per_warehouse,
            });
        }

        let assignment = Assignment::new(product_code, store_code, warehouse_code, Utc::now());
        uow.insert_assignment(&assignment).await?;
        uow.commit().await?;

        info!(
            product_code,
            store_code, warehouse_code, "fulfilment assignment created"
        );
        Ok(assignment)
    }
}
