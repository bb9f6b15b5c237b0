use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use shared_types::CatalogSummary;

use crate::error::{CatalogError, Result};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CatalogInfo {
    /// Mix-n-Match catalog number, also used in the dump's file name.
    pub id: u32,
    /// Wikidata property that stores this catalog's external id.
    pub property: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// The catalogs listed in `catalog_info.yml`, keyed by their short name.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(transparent)]
pub struct CatalogRegistry {
    catalogs: BTreeMap<String, CatalogInfo>,
}

impl CatalogRegistry {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let registry: CatalogRegistry = serde_yaml::from_reader(file)?;
        tracing::debug!(
            path = %path.display(),
            catalogs = registry.catalogs.len(),
            "Loaded catalog registry"
        );
        Ok(registry)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn get(&self, key: &str) -> Result<&CatalogInfo> {
        self.catalogs
            .get(key)
            .ok_or_else(|| CatalogError::UnknownCatalog(key.to_string()))
    }

    pub fn summaries(&self) -> Vec<CatalogSummary> {
        self.catalogs
            .iter()
            .map(|(key, info)| CatalogSummary {
                key: key.clone(),
                id: info.id,
                name: info.name.clone().unwrap_or_else(|| key.clone()),
                property: info.property.clone(),
            })
            .collect()
    }
}
