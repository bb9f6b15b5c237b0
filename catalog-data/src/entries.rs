use std::io::Read;

use csv::ReaderBuilder;
use serde::Deserialize;
use shared_types::{haversine_km, Coordinates};

use crate::error::Result;

/// A catalog entry that carries usable coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub entry_id: String,
    pub external_id: String,
    pub external_url: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl CatalogEntry {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    entry_id: String,
    #[serde(default)]
    external_id: String,
    #[serde(default)]
    external_url: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    lat: Option<String>,
    #[serde(default)]
    lon: Option<String>,
}

impl RawRow {
    fn into_entry(self) -> Option<CatalogEntry> {
        let lat = self.lat.as_deref()?.trim().parse::<f64>().ok()?;
        let lng = self.lon.as_deref()?.trim().parse::<f64>().ok()?;

        let raw_name = self
            .name
            .filter(|n| !n.is_empty())
            .or(self.description)
            .unwrap_or_default();
        let name = raw_name.trim_matches(&['"', ' '][..]);
        let name = if name.is_empty() { "Unnamed" } else { name };

        Some(CatalogEntry {
            entry_id: self.entry_id,
            external_id: self.external_id,
            external_url: self.external_url,
            name: name.to_string(),
            lat,
            lng,
        })
    }
}

/// Parses a Mix-n-Match tab-separated dump.
///
/// Leading `#` characters are stripped from every line so the commented
/// header row is picked up as column names. Rows without numeric `lat`/`lon`
/// are dropped.
pub fn parse_catalog<R: Read>(mut reader: R) -> Result<Vec<CatalogEntry>> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;

    let cleaned: String = raw
        .lines()
        .map(|line| line.trim_start_matches('#'))
        .collect::<Vec<_>>()
        .join("\n");

    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .from_reader(cleaned.as_bytes());

    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for row in csv_reader.deserialize::<RawRow>() {
        match row.map(RawRow::into_entry) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => skipped += 1,
            Err(e) => {
                tracing::warn!("Skipping unreadable catalog row: {}", e);
                skipped += 1;
            }
        }
    }

    tracing::debug!(kept = entries.len(), skipped, "Parsed catalog dump");
    Ok(entries)
}

/// Entries within `radius_km` of `center`, in file order.
pub fn nearby(entries: &[CatalogEntry], center: Coordinates, radius_km: f64) -> Vec<CatalogEntry> {
    entries
        .iter()
        .filter(|e| haversine_km(center, e.coordinates()) <= radius_km)
        .cloned()
        .collect()
}
