// Wikidata service module
// Action API (search + entity claims) and SPARQL lookups used to enrich catalog entries

use std::collections::HashMap;

use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared_types::wikidata::{coordinates_of, qid_from_entity_uri, suggestions_from_search, SearchResponse};
use shared_types::{Coordinates, PlaceSuggestion, MIN_QUERY_LEN};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};

/// SPARQL `VALUES` blocks are split into batches of this many ids.
pub const SPARQL_CHUNK: usize = 400;

#[derive(Debug, Deserialize)]
pub struct SparqlResponse {
    pub results: SparqlResults,
}

#[derive(Debug, Deserialize)]
pub struct SparqlResults {
    pub bindings: Vec<HashMap<String, SparqlTerm>>,
}

#[derive(Debug, Deserialize)]
pub struct SparqlTerm {
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct WikidataClient {
    http: Client,
    api_url: String,
    sparql_url: String,
}

impl WikidataClient {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let http = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self {
            http,
            api_url: config.wikidata_api_url.clone(),
            sparql_url: config.sparql_url.clone(),
        })
    }

    /// Label-matched place suggestions for an autocomplete query.
    pub async fn search_places(&self, query: &str) -> Result<Vec<PlaceSuggestion>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("action", "wbsearchentities"),
                ("search", query),
                ("format", "json"),
                ("language", "en"),
                ("uselang", "en"),
                ("type", "item"),
            ])
            .send()
            .await?;

        let body: SearchResponse = read_json(response).await?;
        let suggestions = suggestions_from_search(&body);
        tracing::debug!(query, hits = body.search.len(), kept = suggestions.len(), "Wikidata search");
        Ok(suggestions)
    }

    /// Coordinate location (P625) of an item, if it has one.
    pub async fn place_coordinates(&self, qid: &str) -> Result<Option<Coordinates>> {
        if !is_item_id(qid) {
            return Err(CatalogError::InvalidIdentifier(qid.to_string()));
        }

        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("action", "wbgetentities"),
                ("ids", qid),
                ("props", "claims"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let body: serde_json::Value = read_json(response).await?;
        Ok(coordinates_of(&body, qid))
    }

    async fn sparql(&self, query: &str) -> Result<SparqlResponse> {
        let response = self
            .http
            .get(&self.sparql_url)
            .header(header::ACCEPT, "application/sparql-results+json")
            .query(&[("query", query), ("format", "json")])
            .send()
            .await?;

        read_json(response).await
    }

    /// Maps external ids of a catalog to the Q-ids of items carrying them
    /// through `property`.
    pub async fn lookup_qids(
        &self,
        property: &str,
        external_ids: &[String],
    ) -> Result<HashMap<String, String>> {
        if !is_property_id(property) {
            return Err(CatalogError::InvalidIdentifier(property.to_string()));
        }

        let mut found = HashMap::new();
        for batch in external_ids.chunks(SPARQL_CHUNK) {
            let body = self.sparql(&qid_lookup_query(property, batch)).await?;
            found.extend(pairs_from_bindings(&body, "id", "item"));
        }
        tracing::debug!(property, requested = external_ids.len(), matched = found.len(), "Q-id lookup");
        Ok(found)
    }

    /// Image (P18) of each item that has one.
    pub async fn images_for(&self, qids: &[String]) -> Result<HashMap<String, String>> {
        let qids: Vec<String> = qids.iter().filter(|q| is_item_id(q)).cloned().collect();

        let mut images = HashMap::new();
        for batch in qids.chunks(SPARQL_CHUNK) {
            let body = self.sparql(&image_query(batch)).await?;
            images.extend(pairs_from_bindings(&body, "item", "image"));
        }
        Ok(images)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CatalogError::Api {
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

fn is_prefixed_number(id: &str, prefix: char) -> bool {
    let mut chars = id.chars();
    chars.next() == Some(prefix) && {
        let rest = chars.as_str();
        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit())
    }
}

pub fn is_item_id(id: &str) -> bool {
    is_prefixed_number(id, 'Q')
}

pub fn is_property_id(id: &str) -> bool {
    is_prefixed_number(id, 'P')
}

fn sparql_string(raw: &str) -> String {
    let escaped = raw
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    format!("\"{}\"", escaped)
}

pub fn qid_lookup_query(property: &str, external_ids: &[String]) -> String {
    let values = external_ids
        .iter()
        .map(|id| sparql_string(id))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "SELECT ?id ?item WHERE {{ VALUES ?id {{ {} }} ?item wdt:{} ?id . }}",
        values, property
    )
}

pub fn image_query(qids: &[String]) -> String {
    let values = qids
        .iter()
        .map(|q| format!("wd:{}", q))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "SELECT ?item ?image WHERE {{ VALUES ?item {{ {} }} OPTIONAL {{ ?item wdt:P18 ?image }} }}",
        values
    )
}

/// Collects `key -> Q-id or value` pairs from result rows that bind both
/// variables. Entity URIs on either side are reduced to their Q-id.
pub fn pairs_from_bindings(
    response: &SparqlResponse,
    key_var: &str,
    value_var: &str,
) -> Vec<(String, String)> {
    let simplify = |term: &SparqlTerm| {
        if term.value.starts_with("http://www.wikidata.org/entity/") {
            qid_from_entity_uri(&term.value).to_string()
        } else {
            term.value.clone()
        }
    };

    response
        .results
        .bindings
        .iter()
        .filter_map(|row| {
            let key = row.get(key_var)?;
            let value = row.get(value_var)?;
            Some((simplify(key), simplify(value)))
        })
        .collect()
}
