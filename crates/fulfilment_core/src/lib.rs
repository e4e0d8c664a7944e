//! fulfilment_core — domain types, port traits and validation services for
//! store fulfilment and the warehouse lifecycle.
//!
//! Services take their stores as `Arc<dyn PortTrait>` so the same rules run
//! against PostgreSQL (`fulfilment_postgres`) or the in-memory store.

pub mod error;
pub mod fulfilment;
pub mod locations;
pub mod memory;
pub mod ports;
pub mod seeds;
pub mod types;
pub mod warehouse;

#[cfg(test)]
mod testing;

pub use error::FulfilmentError;
pub use fulfilment::{FulfilmentLimits, FulfilmentService};
pub use locations::StaticLocationResolver;
pub use memory::MemoryStores;
pub use warehouse::WarehouseService;
