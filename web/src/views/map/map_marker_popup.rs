use leptos::prelude::*;
use shared_types::MapPoint;

#[component]
pub fn MapMarkerPopup(point: MapPoint) -> impl IntoView {
    let MapPoint {
        loc_name,
        wikidata,
        image,
        external_url,
        external_id,
        mnm,
        ..
    } = point;

    view! {
        <div class="marker-popup">
            <strong>{loc_name}</strong>

            {wikidata.map(|href| view! {
                <br/>
                <a href=href target="_blank">"View on Wikidata"</a>
            })}

            {image.map(|src| view! {
                <br/>
                <img
                    src=src
                    alt=""
                    style="max-width:150px;max-height:150px;margin-top:4px;"
                />
            })}

            <div class="marker-popup__links">
                <a href=mnm target="_blank">"Mix'n'match entry"</a>
                {(!external_url.is_empty()).then(|| view! {
                    " · "
                    <a href=external_url target="_blank">{format!("Source #{}", external_id)}</a>
                })}
            </div>
        </div>
    }
}
