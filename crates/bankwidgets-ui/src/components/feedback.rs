//! Status feedback: alert banners and loading spinners.

use dioxus::prelude::*;

/// Banner color semantics
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AlertKind {
    #[default]
    Danger,
    Success,
}

impl AlertKind {
    pub fn class(&self) -> &'static str {
        match self {
            AlertKind::Danger => "alert alert-danger",
            AlertKind::Success => "alert alert-success",
        }
    }
}

/// Inline message shown above a form.
#[component]
pub fn AlertBanner(message: String, #[props(default)] kind: AlertKind) -> Element {
    rsx! {
        div { class: kind.class(), "role": "alert", "{message}" }
    }
}

/// Loading indicator, optionally with text.
#[component]
pub fn Spinner(#[props(default)] label: Option<String>) -> Element {
    rsx! {
        span { class: "spinner-wrapper", "aria-label": "loading",
            span { class: "spinner" }
            if let Some(text) = label {
                span { class: "spinner-label", "{text}" }
            }
        }
    }
}
