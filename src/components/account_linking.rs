//! Account linking flow.
//!
//! ```text
//! ┌ AccountLinkingFlow ─────────────────────────┐
//! │  link form ── add_account ──┬─ error banner │
//! │                             └─ session list │
//! │  session list ── Verify ──► ModalTemplate   │
//! │               └─ Remove ──► unlink_account  │
//! └─────────────────────────────────────────────┘
//! ```

use bankwidgets_core::{
    add_account, announce_verified, unlink_account, verify_account, AccountEvent, AccountType,
    DepositField, LinkRequest, LinkedAccountCreated, LinkedAccountRef, MountGuard,
    StringResources, VerificationForm, VerificationPhase, VerificationTarget, WidgetError,
};
use bankwidgets_ui::{
    AlertBanner, AlertKind, Button, ButtonStyleKey, CloseReason, Input, ModalTemplate,
    MoneyInput, Select, Spinner,
};
use dioxus::prelude::*;

use crate::context::use_app;

/// Banner text for a failed account creation.
pub fn link_error_message(error: &WidgetError, strings: &StringResources) -> String {
    match error {
        WidgetError::InvalidRoutingNumber => {
            strings.resource("linkedaccounts.error.invalidroutingnumber")
        }
        _ => strings.resource("linkedaccounts.error.server"),
    }
}

/// An account linked during this session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionAccount {
    pub name: String,
    pub account: Option<LinkedAccountRef>,
    /// Set while the account still needs micro-deposit verification
    pub pending: Option<VerificationTarget>,
}

impl SessionAccount {
    fn from_created(request: &LinkRequest, created: &LinkedAccountCreated) -> Self {
        let name = if request.account_name.is_empty() {
            request.institution_name.clone()
        } else {
            request.account_name.clone()
        };
        let pending = match (&created.ach_id, created.requires_verification()) {
            (Some(ach_id), true) => Some(VerificationTarget {
                ach_id: ach_id.clone(),
                account_name: name.clone(),
            }),
            _ => None,
        };
        Self {
            name,
            account: created.account_ref(),
            pending,
        }
    }

    fn key(&self) -> String {
        self.account
            .as_ref()
            .map(|a| a.account_id.clone())
            .or_else(|| self.pending.as_ref().map(|p| p.ach_id.clone()))
            .unwrap_or_else(|| self.name.clone())
    }
}

fn account_type_options() -> Vec<(String, String)> {
    AccountType::ALL
        .iter()
        .map(|t| (t.as_str().to_string(), t.as_str().to_string()))
        .collect()
}

/// Link form, accounts linked this session, and the verification modal.
#[component]
pub fn AccountLinkingFlow() -> Element {
    let ctx = use_app();
    let strings = ctx.strings.clone();

    let guard = use_hook(MountGuard::new);
    use_drop({
        let guard = guard.clone();
        move || guard.unmount()
    });

    let mut institution = use_signal(String::new);
    let mut routing_number = use_signal(String::new);
    let mut account_number = use_signal(String::new);
    let mut account_type = use_signal(AccountType::default);
    let mut account_name = use_signal(String::new);

    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut accounts: Signal<Vec<SessionAccount>> = use_signal(Vec::new);
    let mut verifying = use_signal(|| Option::<VerificationTarget>::None);

    let complete = !institution().trim().is_empty()
        && !routing_number().trim().is_empty()
        && !account_number().trim().is_empty();

    let on_submit = {
        let ctx = ctx.clone();
        let guard = guard.clone();
        move |_| {
            if submitting() {
                return;
            }
            let request = LinkRequest {
                institution_name: institution().trim().to_string(),
                routing_number: routing_number().trim().to_string(),
                account_number: account_number().trim().to_string(),
                account_type: account_type(),
                account_name: account_name().trim().to_string(),
            };
            submitting.set(true);
            error.set(None);
            notice.set(None);

            let ctx = ctx.clone();
            let guard = guard.clone();
            spawn(async move {
                let result = add_account(&ctx.client, &request).await;
                guard.apply(|| {
                    submitting.set(false);
                    match result {
                        Ok(response) => {
                            let created = LinkedAccountCreated::from_response(&response);
                            let session = SessionAccount::from_created(&request, &created);
                            tracing::info!(name = %session.name, pending = session.pending.is_some(), "account linked");

                            ctx.events.publish(AccountEvent::Linked {
                                linked_account_id: created.linked_account_id.clone(),
                            });
                            if let Some(target) = &session.pending {
                                verifying.set(Some(target.clone()));
                            }
                            accounts.write().push(session);
                            notice.set(Some(ctx.strings.resource("linkedaccounts.addaccountsuccess")));

                            institution.set(String::new());
                            routing_number.set(String::new());
                            account_number.set(String::new());
                            account_name.set(String::new());
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "account link failed");
                            error.set(Some(link_error_message(&e, &ctx.strings)));
                        }
                    }
                });
            });
        }
    };

    let on_verify_close = move |reason: CloseReason| {
        let Some(target) = verifying() else {
            return;
        };
        if reason == CloseReason::Close {
            // Verified: the account is no longer pending
            for account in accounts.write().iter_mut() {
                if account.pending.as_ref() == Some(&target) {
                    account.pending = None;
                }
            }
        }
        verifying.set(None);
    };

    let busy = submitting();
    let modal_title = strings.resource("linkedaccounts.verifyaccount");

    rsx! {
        div { class: "account-linking",
            h2 { class: "widget-title", {strings.resource("linkedaccounts.addaccount.title")} }

            if let Some(message) = error() {
                AlertBanner { message }
            }
            if let Some(message) = notice() {
                AlertBanner { message, kind: AlertKind::Success }
            }

            form {
                class: "link-form",
                onsubmit: move |e| e.prevent_default(),

                Input {
                    id: "institutionName",
                    value: institution(),
                    oninput: move |v| institution.set(v),
                    label: strings.resource("linkedaccounts.institutionname"),
                    disabled: busy,
                }
                Input {
                    id: "routingNumber",
                    value: routing_number(),
                    oninput: move |v| routing_number.set(v),
                    label: strings.resource("linkedaccounts.routingnumber"),
                    input_type: "text",
                    disabled: busy,
                }
                Input {
                    id: "accountNumber",
                    value: account_number(),
                    oninput: move |v| account_number.set(v),
                    label: strings.resource("linkedaccounts.accountnumber"),
                    disabled: busy,
                }
                Select {
                    id: "accountType",
                    value: account_type().as_str().to_string(),
                    options: account_type_options(),
                    onchange: move |v: String| {
                        if let Ok(parsed) = v.parse::<AccountType>() {
                            account_type.set(parsed);
                        }
                    },
                    label: strings.resource("linkedaccounts.accounttype"),
                    disabled: busy,
                }
                Input {
                    id: "accountName",
                    value: account_name(),
                    oninput: move |v| account_name.set(v),
                    label: strings.resource("linkedaccounts.accountname"),
                    disabled: busy,
                }

                div { class: "form-actions",
                    Button {
                        style_key: ButtonStyleKey::Primary,
                        button_type: "submit",
                        disabled: busy || !complete,
                        onclick: on_submit,
                        if busy {
                            Spinner {}
                        } else {
                            {strings.resource("linkedaccounts.addaccountbutton.text")}
                        }
                    }
                }
            }

            if !accounts.read().is_empty() {
                ul { class: "session-accounts",
                    for account in accounts() {
                        SessionAccountRow {
                            key: "{account.key()}",
                            account: account.clone(),
                            on_verify: move |target| verifying.set(Some(target)),
                            on_removed: move |removed: LinkedAccountRef| {
                                accounts.write().retain(|a| a.account.as_ref() != Some(&removed));
                            },
                        }
                    }
                }
            }

            ModalTemplate {
                show: verifying.read().is_some(),
                title: modal_title,
                on_close: on_verify_close,
                dismissable: false,
                if let Some(target) = verifying() {
                    VerifyAccountForm {
                        key: "{target.ach_id}",
                        target,
                        on_close: on_verify_close,
                    }
                }
            }
        }
    }
}

/// One linked account with its Verify and Remove actions.
#[component]
fn SessionAccountRow(
    account: SessionAccount,
    on_verify: EventHandler<VerificationTarget>,
    on_removed: EventHandler<LinkedAccountRef>,
) -> Element {
    let strings = use_app().strings;
    let pending = account.pending.clone();

    rsx! {
        li { class: "session-account",
            span { class: "session-account-name", "{account.name}" }
            if let Some(target) = pending {
                Button {
                    style_key: ButtonStyleKey::Text,
                    onclick: move |_| on_verify.call(target.clone()),
                    {strings.resource("linkedaccounts.verifyaccount")}
                }
            }
            if let Some(linked) = account.account.clone() {
                RemoveLinkedAccountButton { account: linked, on_removed }
            }
        }
    }
}

/// Unlinks an account. A failed delete is logged by the core and leaves the
/// row in place with no message.
#[component]
pub fn RemoveLinkedAccountButton(
    account: LinkedAccountRef,
    on_removed: EventHandler<LinkedAccountRef>,
) -> Element {
    let ctx = use_app();
    let mut removing = use_signal(|| false);
    let guard = use_hook(MountGuard::new);
    use_drop({
        let guard = guard.clone();
        move || guard.unmount()
    });

    let label = ctx.strings.resource("linkedaccounts.removeaccount");
    let on_click = move |_| {
        if removing() {
            return;
        }
        removing.set(true);
        let ctx = ctx.clone();
        let guard = guard.clone();
        let account = account.clone();
        spawn(async move {
            let removed = unlink_account(&ctx.client, &ctx.events, &account).await;
            guard.apply(|| {
                removing.set(false);
                if removed {
                    on_removed.call(account);
                }
            });
        });
    };

    rsx! {
        Button {
            style_key: ButtonStyleKey::Text,
            class: "danger",
            disabled: removing(),
            onclick: on_click,
            "{label}"
        }
    }
}

/// Micro-deposit verification form hosted by [`ModalTemplate`].
///
/// On success the modal closes immediately and the account change is
/// announced after the configured refresh delay.
#[component]
pub fn VerifyAccountForm(target: VerificationTarget, on_close: EventHandler<CloseReason>) -> Element {
    let ctx = use_app();
    let strings = ctx.strings.clone();
    let mut form = use_signal(|| VerificationForm::new(target.clone()));

    let guard = use_hook(MountGuard::new);
    use_drop({
        let guard = guard.clone();
        move || guard.unmount()
    });

    let on_submit = move |_| {
        let attempt = match form.write().begin_submit() {
            Ok(attempt) => attempt,
            Err(e) => {
                tracing::debug!(error = %e, "submit ignored");
                return;
            }
        };
        let ctx = ctx.clone();
        let guard = guard.clone();
        spawn(async move {
            let verified = verify_account(&ctx.client, &attempt).await;
            if !guard.is_mounted() {
                tracing::debug!("verification finished after the form closed");
                return;
            }
            let outcome = form.write().finish_submit(verified);
            match outcome {
                Ok(VerificationPhase::Success) => {
                    on_close.call(CloseReason::Close);
                    let events = ctx.events.clone();
                    let delay = ctx.config.success_refresh_delay();
                    // Outlives the modal
                    let _ = spawn_forever(async move {
                        announce_verified(&events, attempt.ach_id, delay).await;
                    });
                }
                Ok(_) => tracing::info!(ach_id = %attempt.ach_id, "verification rejected"),
                Err(e) => tracing::warn!(error = %e, "unexpected verification result"),
            }
        });
    };

    let on_cancel = move |_| {
        if form.read().cancel().is_ok() {
            on_close.call(CloseReason::Cancel);
        }
    };

    let snapshot = form.read().clone();
    let inputs_enabled = snapshot.inputs_enabled();

    rsx! {
        div { class: "verify-account",
            if snapshot.show_error_banner() {
                AlertBanner { message: strings.resource("linkedaccounts.verifyaccounterror") }
            }

            h3 { class: "verify-account-name", "{snapshot.target().account_name}" }
            p { class: "verify-account-message",
                {strings.resource("linkedaccounts.verifyaccountmessage.message")}
            }

            MoneyInput {
                id: "firstDeposit",
                value: snapshot.deposit(DepositField::First).to_string(),
                oninput: move |v: String| {
                    form.write().edit(DepositField::First, v);
                },
                label: strings.resource("linkedaccounts.firstdeposit.text"),
                disabled: !inputs_enabled,
            }
            MoneyInput {
                id: "secondDeposit",
                value: snapshot.deposit(DepositField::Second).to_string(),
                oninput: move |v: String| {
                    form.write().edit(DepositField::Second, v);
                },
                label: strings.resource("linkedaccounts.seconddeposit.text"),
                disabled: !inputs_enabled,
            }

            div { class: "form-actions",
                Button {
                    style_key: ButtonStyleKey::Primary,
                    disabled: !snapshot.submit_enabled(),
                    onclick: on_submit,
                    if snapshot.is_submitting() {
                        Spinner {}
                    } else {
                        {strings.resource("linkedaccounts.completeverificationbutton.text")}
                    }
                }
                Button {
                    style_key: ButtonStyleKey::Text,
                    disabled: !snapshot.cancel_enabled(),
                    onclick: on_cancel,
                    {strings.resource("misc.cancel")}
                }
            }
        }
    }
}
