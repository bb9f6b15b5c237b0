use leptos::prelude::*;
use thaw::{Spinner, SpinnerSize};

#[component]
pub fn LoadingView(
    message: Option<String>,
    /// Inline spinner for use next to form fields.
    #[prop(optional)]
    compact: bool,
) -> impl IntoView {
    let size = if compact { SpinnerSize::Tiny } else { SpinnerSize::Large };

    view! {
        <div class="loading-container" class:loading-container--compact=compact>
            <Spinner size=size />
            <p class="loading-message">
                {message.unwrap_or_else(|| "Loading places...".to_string())}
            </p>
        </div>
    }
}
