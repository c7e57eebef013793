//! Button Components
//!
//! Two style keys cover every action in the widgets:
//! - Primary: the form's main action
//! - Text: secondary actions rendered as a link-like button

use dioxus::prelude::*;

/// Button style variants
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ButtonStyleKey {
    /// Filled button for the main action
    #[default]
    Primary,
    /// Borderless secondary action
    Text,
}

impl ButtonStyleKey {
    /// Returns the CSS class for this style key
    pub fn class(&self) -> &'static str {
        match self {
            ButtonStyleKey::Primary => "btn-primary",
            ButtonStyleKey::Text => "btn-text",
        }
    }
}

/// Properties for the Button component
#[derive(Clone, PartialEq, Props)]
pub struct ButtonProps {
    #[props(default)]
    pub style_key: ButtonStyleKey,
    pub children: Element,
    #[props(default)]
    pub onclick: Option<EventHandler<()>>,
    #[props(default = false)]
    pub disabled: bool,
    /// Optional type attribute (button, submit, reset)
    #[props(default = "button".to_string())]
    pub button_type: String,
    #[props(default)]
    pub class: Option<String>,
}

/// Compose the style key class with any extra classes.
pub fn button_class(style_key: ButtonStyleKey, extra: Option<&str>) -> String {
    match extra.filter(|e| !e.is_empty()) {
        Some(extra) => format!("{} {}", style_key.class(), extra),
        None => style_key.class().to_string(),
    }
}

/// Styled button. Clicks are swallowed while disabled.
///
/// # Example
///
/// ```rust,ignore
/// rsx! {
///     Button {
///         style_key: ButtonStyleKey::Primary,
///         disabled: !form.read().submit_enabled(),
///         onclick: move |_| submit(),
///         "Complete Verification"
///     }
/// }
/// ```
#[component]
pub fn Button(props: ButtonProps) -> Element {
    let full_class = button_class(props.style_key, props.class.as_deref());
    let disabled = props.disabled;

    rsx! {
        button {
            class: "{full_class}",
            r#type: "{props.button_type}",
            disabled: disabled,
            onclick: move |_| {
                if disabled {
                    return;
                }
                if let Some(handler) = &props.onclick {
                    handler.call(());
                }
            },
            {props.children}
        }
    }
}
