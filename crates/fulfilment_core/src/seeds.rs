//! Initial warehouse records.
//!
//! Mirrors `fulfilment_postgres/migrations/0002_seed_warehouses.sql` so the
//! in-memory store starts from the same data as a freshly migrated database.
//! Seed rows predate the location rules and are not validated against them.

use chrono::{DateTime, TimeZone, Utc};

use crate::types::{NewWarehouse, Warehouse};

fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, date, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn seed_warehouses() -> Vec<Warehouse> {
    vec![
        NewWarehouse::new("MWH.001", "ZWOLLE-001", 100, 10).into_warehouse(day(2024, 7, 1)),
        NewWarehouse::new("MWH.012", "AMSTERDAM-001", 50, 5).into_warehouse(day(2023, 7, 1)),
        NewWarehouse::new("MWH.023", "TILBURG-001", 30, 27).into_warehouse(day(2021, 2, 1)),
    ]
}
