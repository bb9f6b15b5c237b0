use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
            response.set_status(http::StatusCode::NOT_FOUND);
        }
    }

    view! {
        <div class="not-found-page">
            <div class="not-found-page__code">"404"</div>
            <h1>"Page Not Found"</h1>
            <p>"There is nothing at this address. Try searching for a place instead."</p>
            <A href="/">
                <button class="btn-primary">"Back to search"</button>
            </A>
        </div>
    }
}
