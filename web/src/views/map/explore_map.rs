use crate::{
    components::{error::ErrorView, loading::LoadingView},
    server::fetch_map_page,
    views::map::map_marker::MapMarker,
};
use leptos::prelude::*;
use leptos_leaflet::prelude::*;
use leptos_router::hooks::use_query_map;
use shared_types::{MapPage, MapQuery};

#[cfg(not(feature = "ssr"))]
use leptos_leaflet::leaflet::{LatLng, LatLngBounds, Map};
#[cfg(not(feature = "ssr"))]
use shared_types::{MapBounds, MapPoint};
#[cfg(not(feature = "ssr"))]
use wasm_bindgen::JsCast;

const INITIAL_ZOOM: f64 = 11.0;
#[cfg(not(feature = "ssr"))]
const FIT_PADDING: f64 = 0.2;

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors | Places &copy; iNaturalist / Wikidata";

/// `/map?lat=..&lng=..[&catalog=..][&dist=..][&show_matched=yes|no]`
#[component]
pub fn ExploreMap() -> impl IntoView {
    let query_map = use_query_map();
    let query = Memo::new(move |_| {
        let params = query_map.read();
        MapQuery::from_params(|key| params.get(key))
    });

    #[cfg(feature = "ssr")]
    {
        if query.get_untracked().is_err() {
            if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
                response.set_status(http::StatusCode::BAD_REQUEST);
            }
        }
    }

    let page = Resource::new(
        move || query.get(),
        move |query| async move {
            match query {
                Ok(query) => fetch_map_page(query).await.map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            }
        },
    );

    view! {
        <div class="map-page">
            <Suspense fallback=move || view! {
                <LoadingView message=Some("Fetching nearby entries...".to_string()) />
            }>
                {move || page.get().map(|result| match result {
                    Ok(map_page) => view! { <PlacesMap page=map_page /> }.into_any(),
                    Err(message) => view! { <ErrorView message=Some(message) /> }.into_any(),
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn PlacesMap(page: MapPage) -> impl IntoView {
    let MapPage { center, points } = page;
    let summary = format!(
        "{} entries, {} linked to Wikidata",
        points.len(),
        points.iter().filter(|p| p.is_matched()).count()
    );

    #[cfg(not(feature = "ssr"))]
    let map = JsRwSignal::new_local(None::<Map>);

    // Leaflet needs the DOM, so the map is only mounted after hydration.
    let map_ready = RwSignal::new(false);

    #[cfg(not(feature = "ssr"))]
    {
        Effect::new(move |_| {
            if let Some(window) = web_sys::window() {
                let _ = window.request_animation_frame(
                    wasm_bindgen::closure::Closure::once_into_js(move || {
                        map_ready.set(true);
                    })
                    .as_ref()
                    .unchecked_ref(),
                );
            }
        });

        let bounds = MapBounds::from_points(points.iter().map(MapPoint::coordinates));
        Effect::new(move |_| {
            let (Some(map_instance), Some(bounds)) = (map.read_only().get(), bounds) else {
                return;
            };
            let padded = bounds.pad(FIT_PADDING);
            leptos::logging::log!(
                "Fitting map to NE({}, {}), SW({}, {})",
                padded.north_east.lat,
                padded.north_east.lng,
                padded.south_west.lat,
                padded.south_west.lng
            );
            map_instance.fit_bounds(&LatLngBounds::new(
                &LatLng::new(padded.south_west.lat, padded.south_west.lng),
                &LatLng::new(padded.north_east.lat, padded.north_east.lng),
            ));
        });
    }

    view! {
        <p class="map-page__summary">{summary}</p>
        <div class="map-renderer-container">
            {move || {
                #[cfg(not(feature = "ssr"))]
                {
                    if map_ready.get() {
                        let points = points.clone();
                        view! {
                            <MapContainer
                                class="map-renderer-map-container"
                                style="height: 75vh"
                                center=Position::new(center.lat, center.lng)
                                zoom=INITIAL_ZOOM
                                set_view=true
                                map=map.write_only()
                            >
                                <TileLayer url=TILE_URL attribution=TILE_ATTRIBUTION />
                                {points
                                    .into_iter()
                                    .map(|point| view! { <MapMarker point=point /> })
                                    .collect_view()}
                            </MapContainer>
                        }.into_any()
                    } else {
                        view! {
                            <LoadingView message=Some("Initializing map...".to_string()) />
                        }.into_any()
                    }
                }

                #[cfg(feature = "ssr")]
                {
                    let _ = (&center, &points, map_ready);
                    view! {
                        <LoadingView message=Some("Initializing map...".to_string()) />
                    }.into_any()
                }
            }}
        </div>
    }
}
