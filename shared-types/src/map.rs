use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::Coordinates;

pub const DEFAULT_CATALOG: &str = "inat";
pub const DEFAULT_DISTANCE_KM: f64 = 25.0;
pub const MIX_N_MATCH_ENTRY_BASE: &str = "https://mix-n-match.toolforge.org/#/entry/";

const MARKER_ICON_BASE: &str =
    "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/";
pub const MARKER_ICON_SIZE: (f64, f64) = (25.0, 41.0);
pub const MARKER_ICON_ANCHOR: (f64, f64) = (12.0, 41.0);

/// A catalog entry as it is plotted on the map.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    pub loc_id: String,
    pub loc_name: String,
    pub lat: f64,
    pub lng: f64,
    pub wikidata: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "external_url")]
    pub external_url: String,
    #[serde(rename = "external_id")]
    pub external_id: String,
    pub mnm: String,
}

impl MapPoint {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    pub fn is_matched(&self) -> bool {
        self.wikidata.is_some()
    }

    pub fn marker_color(&self) -> MarkerColor {
        if self.is_matched() {
            MarkerColor::Blue
        } else {
            MarkerColor::Red
        }
    }
}

pub fn mix_n_match_entry_url(entry_id: &str) -> String {
    format!("{}{}", MIX_N_MATCH_ENTRY_BASE, entry_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerColor {
    Blue,
    Red,
}

impl MarkerColor {
    pub fn name(self) -> &'static str {
        match self {
            MarkerColor::Blue => "blue",
            MarkerColor::Red => "red",
        }
    }

    pub fn icon_url(self) -> String {
        format!("{}marker-icon-{}.png", MARKER_ICON_BASE, self.name())
    }
}

/// Which points to keep based on whether they are already linked to Wikidata.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchFilter {
    #[default]
    All,
    Matched,
    Unmatched,
}

impl MatchFilter {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "yes" => MatchFilter::Matched,
            "no" => MatchFilter::Unmatched,
            _ => MatchFilter::All,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            MatchFilter::All => "",
            MatchFilter::Matched => "yes",
            MatchFilter::Unmatched => "no",
        }
    }

    pub fn accepts(self, matched: bool) -> bool {
        match self {
            MatchFilter::All => true,
            MatchFilter::Matched => matched,
            MatchFilter::Unmatched => !matched,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("lat and lng parameters are required and must be numeric")]
    MissingCoordinates,
    #[error("dist must be a non-negative number, got '{0}'")]
    InvalidDistance(String),
}

/// Parameters of the map page, as carried in its query string.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MapQuery {
    pub lat: f64,
    pub lng: f64,
    pub catalog: String,
    pub dist: f64,
    pub show_matched: MatchFilter,
}

impl MapQuery {
    /// Builds a query from a parameter lookup such as a router query map.
    pub fn from_params<F>(get: F) -> Result<Self, QueryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str| {
            get(key)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };

        let (Some(lat), Some(lng)) = (number("lat"), number("lng")) else {
            return Err(QueryError::MissingCoordinates);
        };

        let catalog = get("catalog")
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATALOG.to_string());

        let dist = match get("dist").filter(|d| !d.trim().is_empty()) {
            None => DEFAULT_DISTANCE_KM,
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|d| d.is_finite() && *d >= 0.0)
                .ok_or(QueryError::InvalidDistance(raw))?,
        };

        let show_matched = get("show_matched")
            .map(|v| MatchFilter::parse(&v))
            .unwrap_or_default();

        Ok(MapQuery {
            lat,
            lng,
            catalog,
            dist,
            show_matched,
        })
    }

    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MapPage {
    pub center: Coordinates,
    pub points: Vec<MapPoint>,
}

/// A catalog the search form lets the user pick.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CatalogSummary {
    pub key: String,
    pub id: u32,
    pub name: String,
    pub property: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn point(wikidata: Option<&str>) -> MapPoint {
        MapPoint {
            loc_id: "7".to_string(),
            loc_name: "Lagoa do Taquaral".to_string(),
            lat: -22.87,
            lng: -47.05,
            wikidata: wikidata.map(str::to_string),
            image: None,
            external_url: "https://www.inaturalist.org/places/7".to_string(),
            external_id: "7".to_string(),
            mnm: mix_n_match_entry_url("7"),
        }
    }

    fn query(pairs: &[(&str, &str)]) -> Result<MapQuery, QueryError> {
        let params: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MapQuery::from_params(|k| params.get(k).cloned())
    }

    #[test]
    fn marker_color_follows_match_state() {
        assert_eq!(point(Some("https://www.wikidata.org/wiki/Q1")).marker_color(), MarkerColor::Blue);
        assert_eq!(point(None).marker_color(), MarkerColor::Red);
        assert!(MarkerColor::Red.icon_url().ends_with("/img/marker-icon-red.png"));
    }

    #[test]
    fn serializes_with_page_keys() {
        let json = serde_json::to_value(point(None)).unwrap();
        assert_eq!(json["locId"], "7");
        assert_eq!(json["locName"], "Lagoa do Taquaral");
        assert_eq!(json["external_id"], "7");
        assert_eq!(json["mnm"], "https://mix-n-match.toolforge.org/#/entry/7");
        assert!(json["wikidata"].is_null());
    }

    #[test]
    fn match_filter_parsing() {
        assert_eq!(MatchFilter::parse("YES"), MatchFilter::Matched);
        assert_eq!(MatchFilter::parse("no"), MatchFilter::Unmatched);
        assert_eq!(MatchFilter::parse(""), MatchFilter::All);
        assert_eq!(MatchFilter::parse("maybe"), MatchFilter::All);

        assert!(MatchFilter::Matched.accepts(true));
        assert!(!MatchFilter::Unmatched.accepts(true));
        assert!(MatchFilter::All.accepts(false));
    }

    #[test]
    fn query_defaults() {
        let q = query(&[("lat", "-22.9"), ("lng", "-47.06")]).unwrap();
        assert_eq!(q.catalog, "inat");
        assert_eq!(q.dist, 25.0);
        assert_eq!(q.show_matched, MatchFilter::All);
        assert_eq!(q.center(), Coordinates::new(-22.9, -47.06));
    }

    #[test]
    fn query_reads_all_params() {
        let q = query(&[
            ("lat", "1"),
            ("lng", "2"),
            ("catalog", "ebird"),
            ("dist", "5.5"),
            ("show_matched", "no"),
        ])
        .unwrap();
        assert_eq!(q.catalog, "ebird");
        assert_eq!(q.dist, 5.5);
        assert_eq!(q.show_matched, MatchFilter::Unmatched);
    }

    #[test]
    fn query_requires_numeric_coordinates() {
        assert_eq!(query(&[("lat", "1")]), Err(QueryError::MissingCoordinates));
        assert_eq!(
            query(&[("lat", "x"), ("lng", "2")]),
            Err(QueryError::MissingCoordinates)
        );
        assert_eq!(
            query(&[("lat", "1"), ("lng", "2"), ("dist", "-3")]),
            Err(QueryError::InvalidDistance("-3".to_string()))
        );
    }
}
