use leptos::{ev::SubmitEvent, prelude::*};
use shared_types::map::{DEFAULT_CATALOG, DEFAULT_DISTANCE_KM};
use shared_types::{validate_coordinates, Coordinates, MatchFilter};

use crate::{
    components::{
        error::{Notice, NoticeKind},
        PlaceAutocomplete,
    },
    server::list_catalogs,
};

fn coordinate_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Landing page: pick a place, a catalog and a radius, then open the map.
#[component]
pub fn SearchPage() -> impl IntoView {
    let selected = RwSignal::new(None::<Coordinates>);
    let notice = RwSignal::new(None::<String>);

    let catalogs = Resource::new(|| (), |_| async move { list_catalogs().await });

    let lat_text = move || coordinate_text(selected.get().map(|c| c.lat));
    let lng_text = move || coordinate_text(selected.get().map(|c| c.lng));

    // The form submits natively as GET /map; only block it when no place was picked.
    let on_submit = move |ev: SubmitEvent| {
        if let Err(e) = validate_coordinates(&lat_text(), &lng_text()) {
            ev.prevent_default();
            notice.set(Some(e.to_string()));
        }
    };

    view! {
        <div class="search-page">
            <h1>"Find Mix'n'match entries near a place"</h1>
            <p class="search-page__intro">
                "Search Wikidata for a place, then see which catalog entries around it are already linked to Wikidata items."
            </p>

            <form class="search-form" action="/map" method="get" on:submit=on_submit>
                <label class="search-form__label">"Place"</label>
                <PlaceAutocomplete selected=selected notice=notice />

                <div class="search-form__row">
                    <label class="search-form__label" for="lat">"Latitude"</label>
                    <input id="lat" type="text" name="lat" readonly prop:value=lat_text />
                    <label class="search-form__label" for="lng">"Longitude"</label>
                    <input id="lng" type="text" name="lng" readonly prop:value=lng_text />
                </div>

                <div class="search-form__row">
                    <label class="search-form__label" for="catalog">"Catalog"</label>
                    <select id="catalog" name="catalog">
                        <Suspense fallback=|| view! { <option value=DEFAULT_CATALOG>{DEFAULT_CATALOG}</option> }>
                            {move || catalogs.get().map(|result| match result {
                                Ok(list) if !list.is_empty() => list
                                    .into_iter()
                                    .map(|c| {
                                        let is_default = c.key == DEFAULT_CATALOG;
                                        let label = format!("{} (#{})", c.name, c.id);
                                        view! {
                                            <option value=c.key selected=is_default>{label}</option>
                                        }
                                    })
                                    .collect_view()
                                    .into_any(),
                                _ => view! {
                                    <option value=DEFAULT_CATALOG>{DEFAULT_CATALOG}</option>
                                }.into_any(),
                            })}
                        </Suspense>
                    </select>

                    <label class="search-form__label" for="dist">"Radius (km)"</label>
                    <input
                        id="dist"
                        type="number"
                        name="dist"
                        min="0"
                        step="any"
                        value=DEFAULT_DISTANCE_KM.to_string()
                    />

                    <label class="search-form__label" for="show_matched">"Show"</label>
                    <select id="show_matched" name="show_matched">
                        <option value=MatchFilter::All.as_param()>"All entries"</option>
                        <option value=MatchFilter::Matched.as_param()>"Only linked to Wikidata"</option>
                        <option value=MatchFilter::Unmatched.as_param()>"Only unlinked"</option>
                    </select>
                </div>

                <button type="submit" class="btn-primary">"Show map"</button>
            </form>

            {move || notice.get().map(|message| view! {
                <Notice kind=NoticeKind::Warning message=message />
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_coordinates_render_as_blank_fields() {
        assert_eq!(coordinate_text(None), "");
        assert_eq!(coordinate_text(Some(-22.9056)), "-22.9056");
    }

    #[test]
    fn blank_fields_block_submission() {
        assert!(validate_coordinates(&coordinate_text(None), &coordinate_text(None)).is_err());
        assert_eq!(
            validate_coordinates(&coordinate_text(Some(1.5)), &coordinate_text(Some(-2.0))),
            Ok(Coordinates::new(1.5, -2.0))
        );
    }
}
