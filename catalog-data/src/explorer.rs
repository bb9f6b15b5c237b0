use std::collections::HashMap;
use std::future::Future;

use shared_types::map::mix_n_match_entry_url;
use shared_types::wikidata::wikidata_entity_url;
use shared_types::{CatalogSummary, Coordinates, MapPage, MapPoint, MapQuery, PlaceSuggestion};

use crate::config::CatalogConfig;
use crate::entries::{nearby, CatalogEntry};
use crate::error::Result;
use crate::registry::CatalogRegistry;
use crate::services::wikidata::WikidataClient;
use crate::store::CatalogStore;

/// Links catalog entries to Wikidata items and their images.
pub trait EntityLinker {
    fn lookup_qids(
        &self,
        property: &str,
        external_ids: &[String],
    ) -> impl Future<Output = Result<HashMap<String, String>>> + Send;

    fn images_for(
        &self,
        qids: &[String],
    ) -> impl Future<Output = Result<HashMap<String, String>>> + Send;
}

impl EntityLinker for WikidataClient {
    fn lookup_qids(
        &self,
        property: &str,
        external_ids: &[String],
    ) -> impl Future<Output = Result<HashMap<String, String>>> + Send {
        WikidataClient::lookup_qids(self, property, external_ids)
    }

    fn images_for(
        &self,
        qids: &[String],
    ) -> impl Future<Output = Result<HashMap<String, String>>> + Send {
        WikidataClient::images_for(self, qids)
    }
}

/// Turns enriched entries into map points. `qids` is keyed by external id,
/// `images` by Q-id.
pub fn assemble_points(
    entries: &[CatalogEntry],
    qids: &HashMap<String, String>,
    images: &HashMap<String, String>,
) -> Vec<MapPoint> {
    entries
        .iter()
        .map(|e| {
            let qid = qids.get(&e.external_id).filter(|q| !q.is_empty());
            MapPoint {
                loc_id: e.entry_id.clone(),
                loc_name: e.name.clone(),
                lat: e.lat,
                lng: e.lng,
                wikidata: qid.map(|q| wikidata_entity_url(q)),
                image: qid.and_then(|q| images.get(q)).cloned(),
                external_url: e.external_url.clone(),
                external_id: e.external_id.clone(),
                mnm: mix_n_match_entry_url(&e.entry_id),
            }
        })
        .collect()
}

/// Everything the map and search pages need, built once at startup.
#[derive(Debug)]
pub struct Explorer<L = WikidataClient> {
    pub registry: CatalogRegistry,
    pub store: CatalogStore,
    pub linker: L,
}

impl Explorer<WikidataClient> {
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Ok(Self {
            registry: CatalogRegistry::load(&config.registry_path())?,
            store: CatalogStore::new(&config.data_dir),
            linker: WikidataClient::new(config)?,
        })
    }

    pub async fn search_places(&self, query: &str) -> Result<Vec<PlaceSuggestion>> {
        self.linker.search_places(query).await
    }

    pub async fn place_coordinates(&self, qid: &str) -> Result<Option<Coordinates>> {
        self.linker.place_coordinates(qid).await
    }
}

impl<L: EntityLinker> Explorer<L> {
    pub fn catalogs(&self) -> Vec<CatalogSummary> {
        self.registry.summaries()
    }

    /// Catalog entries near the query point, linked to Wikidata, filtered
    /// by match state.
    pub async fn build_map_page(&self, query: &MapQuery) -> Result<MapPage> {
        let catalog = self.registry.get(&query.catalog)?;
        let entries = self.store.entries(catalog.id).await?;
        let close = nearby(&entries, query.center(), query.dist);

        let external_ids: Vec<String> = close.iter().map(|e| e.external_id.clone()).collect();
        let qids = self.linker.lookup_qids(&catalog.property, &external_ids).await?;

        // Only entries that survive the filter need images.
        let filtered: Vec<CatalogEntry> = close
            .into_iter()
            .filter(|e| {
                let matched = qids.get(&e.external_id).is_some_and(|q| !q.is_empty());
                query.show_matched.accepts(matched)
            })
            .collect();

        let matched_qids: Vec<String> = filtered
            .iter()
            .filter_map(|e| qids.get(&e.external_id))
            .filter(|q| !q.is_empty())
            .cloned()
            .collect();
        let images = self.linker.images_for(&matched_qids).await?;

        let points = assemble_points(&filtered, &qids, &images);
        tracing::info!(
            catalog = %query.catalog,
            radius_km = query.dist,
            points = points.len(),
            "Built map page"
        );

        Ok(MapPage {
            center: query.center(),
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{MarkerColor, MatchFilter};
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct FakeLinker {
        qids: HashMap<String, String>,
        images: HashMap<String, String>,
        image_requests: Mutex<Vec<Vec<String>>>,
    }

    impl EntityLinker for FakeLinker {
        fn lookup_qids(
            &self,
            _property: &str,
            external_ids: &[String],
        ) -> impl Future<Output = Result<HashMap<String, String>>> + Send {
            let found: HashMap<String, String> = external_ids
                .iter()
                .filter_map(|id| self.qids.get(id).map(|q| (id.clone(), q.clone())))
                .collect();
            async move { Ok(found) }
        }

        fn images_for(
            &self,
            qids: &[String],
        ) -> impl Future<Output = Result<HashMap<String, String>>> + Send {
            self.image_requests.lock().unwrap().push(qids.to_vec());
            let found: HashMap<String, String> = qids
                .iter()
                .filter_map(|q| self.images.get(q).map(|i| (q.clone(), i.clone())))
                .collect();
            async move { Ok(found) }
        }
    }

    fn explorer() -> (TempDir, Explorer<FakeLinker>) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("catalog_3900.tsv"),
            "#entry_id\texternal_id\texternal_url\tname\tlat\tlon\n\
             1\t7\thttps://www.inaturalist.org/places/7\tLagoa do Taquaral\t-22.8739\t-47.0497\n\
             2\t8\thttps://www.inaturalist.org/places/8\tBosque dos Jequitibás\t-22.9136\t-47.0508\n\
             3\t9\thttps://www.inaturalist.org/places/9\tParque Ibirapuera\t-23.5874\t-46.6576\n",
        )
        .unwrap();

        let linker = FakeLinker {
            qids: HashMap::from([
                ("7".to_string(), "Q10".to_string()),
                ("9".to_string(), "Q30".to_string()),
            ]),
            images: HashMap::from([("Q10".to_string(), "https://img/taquaral.jpg".to_string())]),
            ..FakeLinker::default()
        };

        let explorer = Explorer {
            registry: CatalogRegistry::from_yaml_str("inat:\n  id: 3900\n  property: P7471\n").unwrap(),
            store: CatalogStore::new(dir.path()),
            linker,
        };
        (dir, explorer)
    }

    fn query(show_matched: MatchFilter) -> MapQuery {
        MapQuery {
            lat: -22.9056,
            lng: -47.0608,
            catalog: "inat".to_string(),
            dist: 25.0,
            show_matched,
        }
    }

    #[tokio::test]
    async fn builds_points_within_radius() {
        let (_dir, explorer) = explorer();
        let page = explorer.build_map_page(&query(MatchFilter::All)).await.unwrap();

        assert_eq!(page.center, Coordinates::new(-22.9056, -47.0608));
        assert_eq!(page.points.len(), 2);

        let taquaral = &page.points[0];
        assert_eq!(taquaral.loc_name, "Lagoa do Taquaral");
        assert_eq!(taquaral.wikidata.as_deref(), Some("https://www.wikidata.org/wiki/Q10"));
        assert_eq!(taquaral.image.as_deref(), Some("https://img/taquaral.jpg"));
        assert_eq!(taquaral.mnm, "https://mix-n-match.toolforge.org/#/entry/1");
        assert_eq!(taquaral.marker_color(), MarkerColor::Blue);

        let bosque = &page.points[1];
        assert_eq!(bosque.wikidata, None);
        assert_eq!(bosque.image, None);
        assert_eq!(bosque.marker_color(), MarkerColor::Red);
    }

    #[tokio::test]
    async fn filters_after_linking() {
        let (_dir, explorer) = explorer();

        let matched = explorer.build_map_page(&query(MatchFilter::Matched)).await.unwrap();
        let names: Vec<_> = matched.points.iter().map(|p| p.loc_name.as_str()).collect();
        assert_eq!(names, vec!["Lagoa do Taquaral"]);

        let unmatched = explorer.build_map_page(&query(MatchFilter::Unmatched)).await.unwrap();
        let names: Vec<_> = unmatched.points.iter().map(|p| p.loc_name.as_str()).collect();
        assert_eq!(names, vec!["Bosque dos Jequitibás"]);
    }

    #[tokio::test]
    async fn images_requested_only_for_matched_points() {
        let (_dir, explorer) = explorer();
        explorer.build_map_page(&query(MatchFilter::All)).await.unwrap();

        let requests = explorer.linker.image_requests.lock().unwrap();
        assert_eq!(requests.as_slice(), &[vec!["Q10".to_string()]]);
    }

    #[tokio::test]
    async fn unknown_catalog_is_rejected() {
        let (_dir, explorer) = explorer();
        let mut q = query(MatchFilter::All);
        q.catalog = "gbif".to_string();

        let err = explorer.build_map_page(&q).await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown catalog 'gbif'");
    }

    #[test]
    fn empty_qid_counts_as_unmatched() {
        let entries = vec![CatalogEntry {
            entry_id: "1".to_string(),
            external_id: "7".to_string(),
            external_url: String::new(),
            name: "Pond".to_string(),
            lat: 0.0,
            lng: 0.0,
        }];
        let qids = HashMap::from([("7".to_string(), String::new())]);

        let points = assemble_points(&entries, &qids, &HashMap::new());
        assert_eq!(points[0].wikidata, None);
    }
}
