use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geo::Coordinates;

pub const WIKIDATA_API_URL: &str = "https://www.wikidata.org/w/api.php";
pub const WIKIDATA_ENTITY_BASE: &str = "https://www.wikidata.org/wiki/";

/// Shortest trimmed query that is sent to `wbsearchentities`.
pub const MIN_QUERY_LEN: usize = 1;

/// Property holding an item's coordinate location.
pub const COORDINATE_PROPERTY: &str = "P625";

/// One autocomplete entry: the display text and the entity it points to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceSuggestion {
    pub value: String,
    pub id: String,
}

/// `wbsearchentities` response body.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchHit {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub description: Option<String>,
    #[serde(rename = "match")]
    pub match_info: Option<SearchMatch>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchMatch {
    #[serde(rename = "type")]
    pub match_type: String,
}

impl SearchHit {
    fn matched_on_label(&self) -> bool {
        self.match_info
            .as_ref()
            .map(|m| m.match_type == "label")
            .unwrap_or(false)
    }

    fn display_value(&self) -> String {
        match self.description.as_deref() {
            Some(desc) if !desc.is_empty() => format!("{} ({})", self.label, desc),
            _ => self.label.clone(),
        }
    }
}

/// Turns a search response into suggestions, dropping hits that matched on an
/// alias rather than the label.
pub fn suggestions_from_search(response: &SearchResponse) -> Vec<PlaceSuggestion> {
    response
        .search
        .iter()
        .filter(|hit| hit.matched_on_label())
        .map(|hit| PlaceSuggestion {
            value: hit.display_value(),
            id: hit.id.clone(),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct GlobeCoordinate {
    latitude: f64,
    longitude: f64,
}

/// Reads the first P625 claim of `id` out of a `wbgetentities` response.
///
/// Entities without claims come back as `[]` rather than `{}`, so the body is
/// walked as untyped JSON and any missing step is treated as "no coordinates".
pub fn coordinates_of(response: &Value, id: &str) -> Option<Coordinates> {
    let value = response
        .get("entities")?
        .get(id)?
        .get("claims")?
        .get(COORDINATE_PROPERTY)?
        .get(0)?
        .get("mainsnak")?
        .get("datavalue")?
        .get("value")?;

    serde_json::from_value::<GlobeCoordinate>(value.clone())
        .ok()
        .map(|c| Coordinates::new(c.latitude, c.longitude))
}

pub fn wikidata_entity_url(qid: &str) -> String {
    format!("{}{}", WIKIDATA_ENTITY_BASE, qid)
}

/// Extracts the trailing Q-id from an entity URI such as
/// `http://www.wikidata.org/entity/Q42`.
pub fn qid_from_entity_uri(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search_fixture() -> SearchResponse {
        serde_json::from_value(json!({
            "searchinfo": { "search": "campinas" },
            "search": [
                {
                    "id": "Q171617",
                    "label": "Campinas",
                    "description": "municipality in São Paulo, Brazil",
                    "match": { "type": "label", "language": "en", "text": "Campinas" }
                },
                {
                    "id": "Q999",
                    "label": "Campinas Airport",
                    "match": { "type": "alias", "language": "en", "text": "campinas" }
                },
                {
                    "id": "Q1000",
                    "label": "Campinas River",
                    "description": "",
                    "match": { "type": "label", "language": "en", "text": "Campinas River" }
                }
            ],
            "success": 1
        }))
        .unwrap()
    }

    #[test]
    fn keeps_only_label_matches() {
        let suggestions = suggestions_from_search(&search_fixture());
        let ids: Vec<_> = suggestions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["Q171617", "Q1000"]);
    }

    #[test]
    fn appends_description_when_present() {
        let suggestions = suggestions_from_search(&search_fixture());
        assert_eq!(
            suggestions[0].value,
            "Campinas (municipality in São Paulo, Brazil)"
        );
        assert_eq!(suggestions[1].value, "Campinas River");
    }

    #[test]
    fn missing_search_array_gives_no_suggestions() {
        let response: SearchResponse = serde_json::from_value(json!({ "error": {} })).unwrap();
        assert!(suggestions_from_search(&response).is_empty());
    }

    #[test]
    fn reads_p625_coordinates() {
        let body = json!({
            "entities": {
                "Q171617": {
                    "id": "Q171617",
                    "claims": {
                        "P625": [{
                            "mainsnak": {
                                "datavalue": {
                                    "value": {
                                        "latitude": -22.9056,
                                        "longitude": -47.0608,
                                        "precision": 0.0001,
                                        "globe": "http://www.wikidata.org/entity/Q2"
                                    },
                                    "type": "globecoordinate"
                                }
                            }
                        }]
                    }
                }
            }
        });

        assert_eq!(
            coordinates_of(&body, "Q171617"),
            Some(Coordinates::new(-22.9056, -47.0608))
        );
    }

    #[test]
    fn entity_without_coordinates_is_none() {
        let no_p625 = json!({ "entities": { "Q1": { "claims": { "P31": [] } } } });
        let empty_claims = json!({ "entities": { "Q1": { "claims": [] } } });
        let novalue = json!({
            "entities": { "Q1": { "claims": { "P625": [{ "mainsnak": { "snaktype": "novalue" } }] } } }
        });

        assert_eq!(coordinates_of(&no_p625, "Q1"), None);
        assert_eq!(coordinates_of(&empty_claims, "Q1"), None);
        assert_eq!(coordinates_of(&novalue, "Q1"), None);
        assert_eq!(coordinates_of(&no_p625, "Q2"), None);
    }

    #[test]
    fn entity_links() {
        assert_eq!(wikidata_entity_url("Q42"), "https://www.wikidata.org/wiki/Q42");
        assert_eq!(qid_from_entity_uri("http://www.wikidata.org/entity/Q42"), "Q42");
    }
}
