use std::time::Duration;

use leptos::{prelude::*, task::spawn_local};
use shared_types::{Coordinates, PlaceSuggestion, MIN_QUERY_LEN, MISSING_COORDINATES_MESSAGE};
use web_sys::KeyboardEvent;

use crate::{
    components::loading::LoadingView,
    server::{get_place_coordinates, search_places},
};

const SUGGESTION_DELAY: Duration = Duration::from_millis(250);

/// Hands out increasing tickets so a response can tell whether a newer
/// request was issued after it.
#[derive(Clone, Copy)]
struct Latest(RwSignal<u64>);

impl Latest {
    fn new() -> Self {
        Self(RwSignal::new(0))
    }

    fn issue(self) -> u64 {
        self.0.update(|g| *g += 1);
        self.0.get_untracked()
    }

    fn is_current(self, ticket: u64) -> bool {
        self.0.get_untracked() == ticket
    }
}

/// Text box that suggests Wikidata places and resolves the chosen one to
/// coordinates.
///
/// `selected` receives the coordinates of the picked place. When the picked
/// entity has no coordinate location it is reset to `None` and `notice`
/// carries the reason.
#[component]
pub fn PlaceAutocomplete(
    selected: RwSignal<Option<Coordinates>>,
    notice: RwSignal<Option<String>>,
) -> impl IntoView {
    let search_input = RwSignal::new(String::new());
    let suggestions = RwSignal::new(Vec::<PlaceSuggestion>::new());
    let show_suggestions = RwSignal::new(false);
    let selected_index = RwSignal::new(0usize);
    let is_resolving = RwSignal::new(false);
    // One ticket per keystroke and one per pick; only the newest may write.
    let keystrokes = Latest::new();
    let picks = Latest::new();

    let fetch_suggestions = move |query: String, ticket: u64| {
        if query.trim().chars().count() < MIN_QUERY_LEN {
            suggestions.set(Vec::new());
            show_suggestions.set(false);
            return;
        }

        set_timeout(
            move || {
                if !keystrokes.is_current(ticket) {
                    return;
                }
                spawn_local(async move {
                    let result = search_places(query.clone()).await;
                    // A newer keystroke may have arrived while waiting.
                    if !keystrokes.is_current(ticket) {
                        return;
                    }
                    match result {
                        Ok(found) => {
                            show_suggestions.set(!found.is_empty());
                            suggestions.set(found);
                        }
                        Err(e) => {
                            leptos::logging::warn!("Suggestions for '{}' failed: {}", query, e);
                            suggestions.set(Vec::new());
                            show_suggestions.set(false);
                        }
                    }
                });
            },
            SUGGESTION_DELAY,
        );
    };

    let select_suggestion = move |suggestion: PlaceSuggestion| {
        search_input.set(suggestion.value.clone());
        show_suggestions.set(false);
        is_resolving.set(true);
        notice.set(None);
        let ticket = picks.issue();

        spawn_local(async move {
            let result = get_place_coordinates(suggestion.id.clone()).await;
            if !picks.is_current(ticket) {
                return;
            }
            match result {
                Ok(Some(coords)) => {
                    leptos::logging::log!(
                        "{} resolved to ({}, {})",
                        suggestion.id,
                        coords.lat,
                        coords.lng
                    );
                    selected.set(Some(coords));
                }
                Ok(None) => {
                    selected.set(None);
                    notice.set(Some(MISSING_COORDINATES_MESSAGE.to_string()));
                }
                Err(e) => {
                    selected.set(None);
                    notice.set(Some(format!("Could not load coordinates: {}", e)));
                }
            }
            is_resolving.set(false);
        });
    };

    let handle_keydown = move |ev: KeyboardEvent| {
        let key = ev.key();
        match key.as_str() {
            "Enter" => {
                // Never let Enter submit the surrounding form from here.
                ev.prevent_default();
                if show_suggestions.get() {
                    if let Some(choice) = suggestions.get().get(selected_index.get()).cloned() {
                        select_suggestion(choice);
                    }
                }
            }
            "ArrowDown" => {
                ev.prevent_default();
                if show_suggestions.get() {
                    let max = suggestions.get().len().saturating_sub(1);
                    selected_index.update(|i| *i = (*i + 1).min(max));
                }
            }
            "ArrowUp" => {
                ev.prevent_default();
                if show_suggestions.get() {
                    selected_index.update(|i| *i = i.saturating_sub(1));
                }
            }
            "Escape" => {
                show_suggestions.set(false);
                selected_index.set(0);
            }
            _ => {}
        }
    };

    let handle_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        search_input.set(value.clone());
        selected_index.set(0);
        fetch_suggestions(value, keystrokes.issue());
    };

    view! {
        <div class="place-search">
            <input
                type="text"
                class="place-search__input"
                placeholder="Start typing a place name..."
                autocomplete="off"
                prop:value=move || search_input.get()
                on:input=handle_input
                on:keydown=handle_keydown
                on:focus=move |_| {
                    if !suggestions.get().is_empty() {
                        show_suggestions.set(true);
                    }
                }
                on:blur=move |_| {
                    // Delay to allow click on suggestion
                    set_timeout(move || {
                        show_suggestions.set(false);
                    }, Duration::from_millis(200));
                }
            />

            {move || is_resolving.get().then(|| view! {
                <LoadingView message=Some("Looking up coordinates...".to_string()) compact=true />
            })}

            {move || if show_suggestions.get() && !suggestions.get().is_empty() {
                view! {
                    <ul class="place-search__suggestions" role="listbox">
                        {suggestions.get().into_iter().enumerate().map(|(idx, suggestion)| {
                            let label = suggestion.value.clone();
                            view! {
                                <li
                                    class="place-search__suggestion"
                                    class:selected=move || selected_index.get() == idx
                                    role="option"
                                    on:mousedown=move |_| select_suggestion(suggestion.clone())
                                    on:mouseenter=move |_| selected_index.set(idx)
                                >
                                    {label}
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}
