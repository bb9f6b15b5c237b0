use crate::views::map::map_marker_popup::MapMarkerPopup;
use leptos::prelude::*;
use leptos_leaflet::prelude::*;
use shared_types::map::{MARKER_ICON_ANCHOR, MARKER_ICON_SIZE};
use shared_types::MapPoint;

/// Blue pin for entries linked to Wikidata, red for the rest.
#[component]
pub fn MapMarker(point: MapPoint) -> impl IntoView {
    let icon_url = point.marker_color().icon_url();

    view! {
        <Marker
            position=Position::new(point.lat, point.lng)
            draggable=false
            icon_url=Some(icon_url)
            icon_size=Some(MARKER_ICON_SIZE)
            icon_anchor=Some(MARKER_ICON_ANCHOR)
        >
            <Popup>
                <MapMarkerPopup point=point />
            </Popup>
        </Marker>
    }
}
