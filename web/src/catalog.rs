#[cfg(feature = "ssr")]
use catalog_data::{CatalogConfig, CatalogError, Explorer};
#[cfg(feature = "ssr")]
use leptos::prelude::ServerFnError;
#[cfg(feature = "ssr")]
use std::sync::OnceLock;

#[cfg(feature = "ssr")]
static EXPLORER: OnceLock<Explorer> = OnceLock::new();

/// Loads the catalog registry and builds the Wikidata client once per process.
#[cfg(feature = "ssr")]
pub fn init_explorer(config: &CatalogConfig) -> Result<(), CatalogError> {
    let explorer = Explorer::from_config(config)?;

    if EXPLORER.set(explorer).is_err() {
        tracing::warn!("Catalog explorer already initialized, keeping the first one");
    }

    Ok(())
}

#[cfg(feature = "ssr")]
pub fn get_explorer() -> Result<&'static Explorer, ServerFnError> {
    EXPLORER
        .get()
        .ok_or_else(|| ServerFnError::new("Catalog explorer not initialized. Call init_explorer() first."))
}
