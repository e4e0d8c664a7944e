//! Static location catalogue.
//!
//! Locations are owned elsewhere; this resolver serves a fixed list, either
//! the built-in catalogue or one loaded from YAML:
//!
//! ```yaml
//! locations:
//!   - identifier: ZWOLLE-001
//!     maxNumberOfWarehouses: 1
//!     maxCapacity: 40
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use crate::ports::{LocationResolver, Result};
use crate::types::Location;

#[derive(Debug, Deserialize)]
struct LocationCatalogueYaml {
    locations: Vec<Location>,
}

#[derive(Debug, Clone)]
pub struct StaticLocationResolver {
    by_identifier: HashMap<String, Location>,
}

impl StaticLocationResolver {
    pub fn new(locations: impl IntoIterator<Item = Location>) -> Self {
        let by_identifier = locations
            .into_iter()
            .map(|l| (l.identifier.clone(), l))
            .collect();
        Self { by_identifier }
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let raw: LocationCatalogueYaml =
            serde_yaml::from_str(yaml).context("invalid location catalogue")?;
        Ok(Self::new(raw.locations))
    }

    pub fn from_yaml_file(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read location catalogue {}", path.display()))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }
}

impl Default for StaticLocationResolver {
    fn default() -> Self {
        Self::new(default_locations())
    }
}

/// The built-in catalogue.
pub fn default_locations() -> Vec<Location> {
    vec![
        Location::new("ZWOLLE-001", 1, 40),
        Location::new("ZWOLLE-002", 2, 50),
        Location::new("AMSTERDAM-001", 5, 100),
        Location::new("AMSTERDAM-002", 3, 75),
        Location::new("TILBURG-001", 1, 40),
        Location::new("HELMOND-001", 1, 45),
        Location::new("EINDHOVEN-001", 2, 70),
        Location::new("VETSBY-001", 1, 90),
    ]
}

#[async_trait]
impl LocationResolver for StaticLocationResolver {
    async fn resolve_by_identifier(&self, identifier: &str) -> Result<Option<Location>> {
        Ok(self.by_identifier.get(identifier).cloned())
    }
}
