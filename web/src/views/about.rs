use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="about-page">
            <h1>"About"</h1>
            <p>
                "This explorer plots entries of "
                <a href="https://mix-n-match.toolforge.org/" target="_blank">"Mix'n'match"</a>
                " catalogs that lie within a chosen distance of a place. Entries already linked to a Wikidata item are shown with a blue marker; entries still waiting for a match are red."
            </p>
            <p>
                "Place search and coordinates come from "
                <a href="https://www.wikidata.org/" target="_blank">"Wikidata"</a>
                ". Map tiles are provided by OpenStreetMap contributors."
            </p>
            <A href="/">
                <button class="btn-primary">"Start searching"</button>
            </A>
        </div>
    }
}
