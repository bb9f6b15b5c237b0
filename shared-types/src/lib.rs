pub mod form;
pub mod geo;
pub mod map;
pub mod wikidata;

pub use form::{validate_coordinates, CoordinateError, MISSING_COORDINATES_MESSAGE};
pub use geo::{haversine_km, Coordinates, MapBounds, EARTH_RADIUS_KM};
pub use map::{CatalogSummary, MapPage, MapPoint, MapQuery, MarkerColor, MatchFilter, QueryError};
pub use wikidata::{PlaceSuggestion, MIN_QUERY_LEN, WIKIDATA_API_URL};
