use leptos::prelude::*;
use thaw::{MessageBar, MessageBarIntent};

const DEFAULT_ERROR: &str = "Something went wrong while loading places. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Warning,
    Error,
}

/// Message bar shown in place of a browser alert.
#[component]
pub fn Notice(kind: NoticeKind, message: String) -> impl IntoView {
    let intent = match kind {
        NoticeKind::Warning => MessageBarIntent::Warning,
        NoticeKind::Error => MessageBarIntent::Error,
    };

    view! {
        <div class="notice" role="alert">
            <MessageBar intent=intent>{message}</MessageBar>
        </div>
    }
}

#[component]
pub fn ErrorView(message: Option<String>) -> impl IntoView {
    view! {
        <Notice
            kind=NoticeKind::Error
            message=message.unwrap_or_else(|| DEFAULT_ERROR.to_string())
        />
    }
}
