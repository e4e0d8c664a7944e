//! Server configuration, read from environment variables:
//!
//!   FULFILMENT_DATABASE_URL (or DATABASE_URL) — Postgres connection string;
//!                                               unset selects the in-memory store
//!   FULFILMENT_DATABASE_POOL_SIZE             — max pool connections (default: 10)
//!   FULFILMENT_BIND_ADDR                      — listen address (default: 0.0.0.0:8080)
//!   FULFILMENT_LOCATIONS_FILE                 — YAML location catalogue (default: built-in)
//!   FULFILMENT_MAX_WAREHOUSES_PER_PRODUCT     — default: 2
//!   FULFILMENT_MAX_WAREHOUSES_PER_STORE       — default: 3
//!   FULFILMENT_MAX_PRODUCTS_PER_WAREHOUSE     — default: 5

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::anyhow;
use fulfilment_core::FulfilmentLimits;
use fulfilment_postgres::DatabaseConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub database: Option<DatabaseConfig>,
    pub locations_file: Option<PathBuf>,
    pub limits: FulfilmentLimits,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = match get("FULFILMENT_DATABASE_URL").or_else(|| get("DATABASE_URL")) {
            Some(url) => {
                let pool_size = parse_or(&get, "FULFILMENT_DATABASE_POOL_SIZE", 10u32)?;
                Some(DatabaseConfig::new(url).with_max_connections(pool_size))
            }
            None => None,
        };

        let defaults = FulfilmentLimits::default();
        let limits = FulfilmentLimits {
            max_warehouses_per_product: parse_or(
                &get,
                "FULFILMENT_MAX_WAREHOUSES_PER_PRODUCT",
                defaults.max_warehouses_per_product,
            )?,
            max_warehouses_per_store: parse_or(
                &get,
                "FULFILMENT_MAX_WAREHOUSES_PER_STORE",
                defaults.max_warehouses_per_store,
            )?,
            max_products_per_warehouse: parse_or(
                &get,
                "FULFILMENT_MAX_PRODUCTS_PER_WAREHOUSE",
                defaults.max_products_per_warehouse,
            )?,
        };

        Ok(Self {
            bind_addr: get("FULFILMENT_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            database,
            locations_file: get("FULFILMENT_LOCATIONS_FILE").map(PathBuf::from),
            limits,
        })
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{key} must be a number, got {raw:?}: {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_select_memory_store() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert!(config.database.is_none());
        assert!(config.locations_file.is_none());
        assert_eq!(config.limits, FulfilmentLimits::default());
    }

    #[test]
    fn prefixed_database_url_wins() {
        let config = config(&[
            ("DATABASE_URL", "postgres://fallback/db"),
            ("FULFILMENT_DATABASE_URL", "postgres://primary/db"),
            ("FULFILMENT_DATABASE_POOL_SIZE", "3"),
        ])
        .unwrap();
        let database = config.database.unwrap();
        assert_eq!(database.database_url, "postgres://primary/db");
        assert_eq!(database.max_connections, 3);
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = config(&[("FULFILMENT_DATABASE_URL", "  "), ("FULFILMENT_BIND_ADDR", "")]).unwrap();
        assert!(config.database.is_none());
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn limits_are_overridable() {
        let config = config(&[
            ("FULFILMENT_MAX_WAREHOUSES_PER_PRODUCT", "4"),
            ("FULFILMENT_MAX_PRODUCTS_PER_WAREHOUSE", " 9 "),
        ])
        .unwrap();
        assert_eq!(config.limits.max_warehouses_per_product, 4);
        assert_eq!(config.limits.max_warehouses_per_store, 3);
        assert_eq!(config.limits.max_products_per_warehouse, 9);
    }

    #[test]
    fn invalid_number_is_an_error() {
        let err = config(&[("FULFILMENT_MAX_WAREHOUSES_PER_STORE", "three")]).unwrap_err();
        assert!(err
            .to_string()
            .contains("FULFILMENT_MAX_WAREHOUSES_PER_STORE must be a number"));
    }
}
