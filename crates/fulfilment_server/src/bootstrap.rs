//! Wires stores, the location catalogue and services from a `ServerConfig`.

use std::sync::Arc;

use anyhow::Context;
use fulfilment_core::ports::StoreProvider;
use fulfilment_core::seeds::seed_warehouses;
use fulfilment_core::{FulfilmentService, MemoryStores, StaticLocationResolver, WarehouseService};
use fulfilment_postgres::{DatabaseManager, PgStores};
use tracing::{info, warn};

use crate::config::ServerConfig;

pub struct Services {
    pub fulfilment: Arc<FulfilmentService>,
    pub warehouses: Arc<WarehouseService>,
    /// Present when running against PostgreSQL; closed on shutdown.
    pub database: Option<DatabaseManager>,
}

pub async fn build_services(config: &ServerConfig) -> anyhow::Result<Services> {
    let locations = match &config.locations_file {
        Some(path) => StaticLocationResolver::from_yaml_file(path)?,
        None => StaticLocationResolver::default(),
    };
    info!(locations = locations.len(), "location catalogue loaded");

    let (stores, database) = match &config.database {
        Some(db_config) => {
            let manager = DatabaseManager::connect(db_config)
                .await
                .context("failed to connect to database")?;
            manager
                .test_connection()
                .await
                .context("database connectivity check failed")?;
            manager
                .run_migrations()
                .await
                .context("failed to run migrations")?;
            let stores: Arc<dyn StoreProvider> = Arc::new(PgStores::new(manager.pool().clone()));
            (stores, Some(manager))
        }
        None => {
            warn!("no database configured, using in-memory store (state is lost on exit)");
            let stores: Arc<dyn StoreProvider> =
                Arc::new(MemoryStores::with_warehouses(seed_warehouses()));
            (stores, None)
        }
    };

    Ok(Services {
        fulfilment: Arc::new(
            FulfilmentService::new(Arc::clone(&stores)).with_limits(config.limits),
        ),
        warehouses: Arc::new(WarehouseService::new(stores, Arc::new(locations))),
        database,
    })
}
