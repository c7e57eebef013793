//! Modal Host Component
//!
//! Overlay dialog that hosts a form. The host decides when to close; the
//! content asks for it through `on_close` with a [`CloseReason`].

use dioxus::prelude::*;

/// Why the modal is being closed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CloseReason {
    /// Content finished its work
    Close,
    /// User pressed cancel
    Cancel,
    /// User clicked outside the dialog
    Backdrop,
}

/// Properties for the ModalTemplate component
#[derive(Clone, PartialEq, Props)]
pub struct ModalTemplateProps {
    pub show: bool,
    pub title: String,
    pub on_close: EventHandler<CloseReason>,
    /// Whether a backdrop click may close the modal (false while work is in flight)
    #[props(default = true)]
    pub dismissable: bool,
    pub children: Element,
}

/// Modal dialog with a title bar
///
/// # Example
///
/// ```rust,ignore
/// rsx! {
///     ModalTemplate {
///         show: show_verify(),
///         title: strings.resource("linkedaccounts.verifyaccount"),
///         on_close: move |_| show_verify.set(false),
///         VerifyAccountForm { target: target.clone() }
///     }
/// }
/// ```
#[component]
pub fn ModalTemplate(props: ModalTemplateProps) -> Element {
    if !props.show {
        return rsx! {};
    }

    let dismissable = props.dismissable;
    let on_close = props.on_close;

    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| {
                if dismissable {
                    on_close.call(CloseReason::Backdrop);
                }
            },

            div {
                class: "modal-dialog",
                "role": "dialog",
                onclick: move |e| e.stop_propagation(),

                h2 { class: "modal-title", "{props.title}" }
                div { class: "modal-body", {props.children} }
            }
        }
    }
}
