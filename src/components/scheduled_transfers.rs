//! Scheduled transfers preview card list.

use bankwidgets_core::{LoadGate, MountGuard, PreviewLoader, PreviewState, TransferOccurrence};
use bankwidgets_ui::Spinner;
use chrono::{Local, Utc};
use dioxus::prelude::*;

use crate::context::{use_accounts_revision, use_app};

/// Up to the configured number of upcoming transfers, soonest first.
///
/// Loads on mount and again whenever the account revision moves. Only the
/// newest load is ever applied.
#[component]
pub fn ScheduledTransfersPreview() -> Element {
    let ctx = use_app();
    let strings = ctx.strings.clone();
    let revision = use_accounts_revision();
    let mut state = use_signal(PreviewState::default);

    let guard = use_hook(MountGuard::new);
    use_drop({
        let guard = guard.clone();
        move || guard.unmount()
    });

    // One load at a time: a new revision cancels the load in flight, and
    // the gate drops any result that still lands after it.
    let gate = use_hook(LoadGate::new);
    let mut in_flight = use_signal(|| Option::<Task>::None);

    use_effect(move || {
        let generation = revision();
        let ctx = ctx.clone();
        let guard = guard.clone();
        let ticket = gate.begin();

        let previous = *in_flight.peek();
        if let Some(previous) = previous {
            previous.cancel();
        }

        let task = spawn(async move {
            tracing::debug!(generation, ticket = ticket.generation(), "loading scheduled transfers");
            let today = Local::now().date_naive();
            let loaded = PreviewLoader::new(&ctx.client, &ctx.strings)
                .with_limit(ctx.config.preview_limit)
                .load(today, Utc::now())
                .await;
            guard.apply(|| {
                ticket.apply(|| state.set(loaded));
            });
        });
        in_flight.set(Some(task));
    });

    let current = state.read().clone();

    rsx! {
        div { class: "scheduled-transfers",
            if current.ordered.is_empty() {
                h6 { class: "transfers-placeholder",
                    if !current.initialized {
                        Spinner {}
                    }
                    {current.placeholder(&strings)}
                }
            } else {
                for transfer in current.ordered.iter() {
                    TransferCard { key: "{transfer.id}", transfer: transfer.clone() }
                }
            }
        }
    }
}

#[component]
fn TransferCard(transfer: TransferOccurrence) -> Element {
    let strings = use_app().strings;
    let header = transfer.header(&strings);
    let summary = transfer.summary(&strings);

    rsx! {
        div { class: "transfer-card",
            div { class: "transfer-card-header", "{header}" }
            div { class: "transfer-card-body", "{summary}" }
            div { class: "transfer-card-footer", "{transfer.transfer_name}" }
        }
    }
}
