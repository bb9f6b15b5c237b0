use std::env;
use std::path::PathBuf;

use shared_types::WIKIDATA_API_URL;

pub const WIKIDATA_SPARQL_URL: &str = "https://query.wikidata.org/sparql";
pub const DEFAULT_USER_AGENT: &str = "mixnmatch-places/0.1";

pub const CATALOG_INFO_FILE: &str = "catalog_info.yml";

/// Runtime settings, read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub data_dir: PathBuf,
    pub wikidata_api_url: String,
    pub sparql_url: String,
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            wikidata_api_url: WIKIDATA_API_URL.to_string(),
            sparql_url: WIKIDATA_SPARQL_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env::var("CATALOG_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            wikidata_api_url: env::var("WIKIDATA_API_URL").unwrap_or(defaults.wikidata_api_url),
            sparql_url: env::var("WIKIDATA_SPARQL_URL").unwrap_or(defaults.sparql_url),
            user_agent: env::var("WIKIDATA_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    pub fn registry_path(&self) -> PathBuf {
        self.data_dir.join(CATALOG_INFO_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lives_in_data_dir() {
        let config = CatalogConfig {
            data_dir: PathBuf::from("/srv/places"),
            ..CatalogConfig::default()
        };
        assert_eq!(config.registry_path(), PathBuf::from("/srv/places/catalog_info.yml"));
    }
}
