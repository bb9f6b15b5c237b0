use leptos::prelude::*;
use leptos::server;
use shared_types::{CatalogSummary, Coordinates, MapPage, MapQuery, PlaceSuggestion};

#[cfg(feature = "ssr")]
use crate::catalog::get_explorer;

#[server]
pub async fn search_places(query: String) -> Result<Vec<PlaceSuggestion>, ServerFnError> {
    match get_explorer()?.search_places(&query).await {
        Ok(suggestions) => Ok(suggestions),
        Err(e) => {
            tracing::warn!("Place search for '{}' failed: {}", query, e);
            Err(ServerFnError::new(format!("Place search failed: {}", e)))
        }
    }
}

#[server]
pub async fn get_place_coordinates(id: String) -> Result<Option<Coordinates>, ServerFnError> {
    get_explorer()?
        .place_coordinates(&id)
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to fetch {}: {}", id, e)))
}

#[server]
pub async fn list_catalogs() -> Result<Vec<CatalogSummary>, ServerFnError> {
    Ok(get_explorer()?.catalogs())
}

#[server]
pub async fn fetch_map_page(query: MapQuery) -> Result<MapPage, ServerFnError> {
    match get_explorer()?.build_map_page(&query).await {
        Ok(page) => Ok(page),
        Err(e) => {
            tracing::error!(catalog = %query.catalog, "Map page failed: {}", e);
            Err(ServerFnError::new(e.to_string()))
        }
    }
}
