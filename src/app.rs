use bankwidgets_ui::AlertBanner;
use dioxus::prelude::*;
use tokio::sync::broadcast::error::RecvError;

use crate::components::{AccountLinkingFlow, ScheduledTransfersPreview};
use crate::context::AccountsRevision;
use crate::theme::GLOBAL_STYLES;

/// Root application component.
///
/// Provides global styles, the widget context, and the account revision
/// counter, then lays out both widgets.
#[component]
pub fn App() -> Element {
    let Some(context) = crate::get_app_context() else {
        return rsx! {
            style { {GLOBAL_STYLES} }
            AlertBanner { message: "Application context was not initialized." }
        };
    };

    let mut revision: Signal<u64> = use_signal(|| 0);
    use_context_provider(|| AccountsRevision(revision));
    let ctx = use_context_provider(|| context);

    // Account changes replace a full reload: bump the revision and let
    // each widget re-fetch.
    use_hook(|| {
        let mut rx = ctx.events.subscribe();
        spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        tracing::debug!(?event, "refreshing account widgets");
                        *revision.write() += 1;
                    }
                    Err(RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "account events lagged, refreshing");
                        *revision.write() += 1;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    });

    rsx! {
        style { {GLOBAL_STYLES} }
        main { class: "app-shell",
            header { class: "app-header",
                h1 { "Bank Widgets" }
            }
            section { class: "widget-panel",
                AccountLinkingFlow {}
            }
            section { class: "widget-panel",
                ScheduledTransfersPreview {}
            }
        }
    }
}
