//! fulfilment_postgres — PostgreSQL adapter for the fulfilment_core ports.

pub mod database;
pub mod sqlx_types;
pub mod store;

pub use database::{mask_database_url, DatabaseConfig, DatabaseManager};
pub use store::{PgStores, PgUnitOfWork};
