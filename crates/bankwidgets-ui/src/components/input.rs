//! Form field components.
//!
//! Every field is controlled: the caller owns the value and receives each
//! change through `oninput`.

use dioxus::prelude::*;

/// Properties for the Input component
#[derive(Clone, PartialEq, Props)]
pub struct InputProps {
    /// Element id, also used to associate the label
    pub id: String,
    pub value: String,
    pub oninput: EventHandler<String>,
    #[props(default)]
    pub label: Option<String>,
    #[props(default)]
    pub placeholder: Option<String>,
    /// Input type (text, password, ...)
    #[props(default = "text".to_string())]
    pub input_type: String,
    #[props(default = false)]
    pub disabled: bool,
    /// Render with the invalid style
    #[props(default = false)]
    pub invalid: bool,
}

/// CSS class for a field in the given validity state.
pub fn field_class(invalid: bool) -> &'static str {
    if invalid {
        "form-control invalid"
    } else {
        "form-control"
    }
}

/// Labelled text input
///
/// # Example
///
/// ```rust,ignore
/// let mut routing = use_signal(String::new);
///
/// rsx! {
///     Input {
///         id: "routingNumber".to_string(),
///         value: routing(),
///         oninput: move |s| routing.set(s),
///         label: "Routing number".to_string(),
///     }
/// }
/// ```
#[component]
pub fn Input(props: InputProps) -> Element {
    let class = field_class(props.invalid);

    rsx! {
        div { class: "form-field",
            if let Some(label) = &props.label {
                label { class: "input-label", r#for: "{props.id}", "{label}" }
            }
            input {
                id: "{props.id}",
                name: "{props.id}",
                class: "{class}",
                r#type: "{props.input_type}",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                oninput: move |e| props.oninput.call(e.value()),
            }
        }
    }
}

/// Properties for the MoneyInput component
#[derive(Clone, PartialEq, Props)]
pub struct MoneyInputProps {
    pub id: String,
    pub value: String,
    pub oninput: EventHandler<String>,
    #[props(default)]
    pub label: Option<String>,
    #[props(default = false)]
    pub disabled: bool,
}

/// Dollar amount field with a `0.00` placeholder. Keeps the raw text.
#[component]
pub fn MoneyInput(props: MoneyInputProps) -> Element {
    rsx! {
        div { class: "form-field money-field",
            if let Some(label) = &props.label {
                label { class: "input-label", r#for: "{props.id}", "{label}" }
            }
            div { class: "money-input-wrapper",
                span { class: "money-prefix", "$" }
                input {
                    id: "{props.id}",
                    name: "{props.id}",
                    class: "form-control deposit-input",
                    r#type: "text",
                    "inputmode": "decimal",
                    value: "{props.value}",
                    placeholder: "0.00",
                    disabled: props.disabled,
                    oninput: move |e| props.oninput.call(e.value()),
                }
            }
        }
    }
}

/// Properties for the Select component
#[derive(Clone, PartialEq, Props)]
pub struct SelectProps {
    pub id: String,
    /// Currently selected option value
    pub value: String,
    /// `(value, label)` pairs
    pub options: Vec<(String, String)>,
    pub onchange: EventHandler<String>,
    #[props(default)]
    pub label: Option<String>,
    #[props(default = false)]
    pub disabled: bool,
}

#[component]
pub fn Select(props: SelectProps) -> Element {
    rsx! {
        div { class: "form-field",
            if let Some(label) = &props.label {
                label { class: "input-label", r#for: "{props.id}", "{label}" }
            }
            select {
                id: "{props.id}",
                class: "form-control",
                disabled: props.disabled,
                onchange: move |e| props.onchange.call(e.value()),
                for (value, label) in props.options.iter() {
                    option {
                        key: "{value}",
                        value: "{value}",
                        selected: *value == props.value,
                        "{label}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_class_marks_invalid() {
        assert_eq!(field_class(false), "form-control");
        assert_eq!(field_class(true), "form-control invalid");
    }
}
