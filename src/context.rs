//! Widget context shared with every component.
//!
//! ## Usage
//!
//! ```ignore
//! // In App component
//! use_context_provider(|| context.clone());
//!
//! // In child components
//! let ctx = use_app();
//! let strings = ctx.strings.clone();
//! ```

use bankwidgets_core::{
    AccountEvents, ApiClient, ClientConfig, ReqwestTransport, StringResources, WidgetResult,
};
use dioxus::prelude::*;

/// Everything a widget needs to talk to the backend and render copy.
#[derive(Clone)]
pub struct AppContext {
    pub client: ApiClient<ReqwestTransport>,
    pub strings: StringResources,
    pub events: AccountEvents,
    pub config: ClientConfig,
}

impl AppContext {
    pub fn from_config(config: ClientConfig) -> WidgetResult<Self> {
        Ok(Self {
            client: ApiClient::from_config(&config)?,
            strings: config.strings()?,
            events: AccountEvents::new(),
            config,
        })
    }
}

/// Counter bumped on every account change; widgets that list accounts or
/// transfers re-fetch when it moves.
#[derive(Clone, Copy)]
pub struct AccountsRevision(pub Signal<u64>);

/// Hook to access the widget context.
pub fn use_app() -> AppContext {
    use_context::<AppContext>()
}

/// Hook to access the account revision counter.
///
/// # Example
///
/// ```ignore
/// let revision = use_accounts_revision();
///
/// use_effect(move || {
///     let _ = revision();
///     // re-fetch
/// });
/// ```
pub fn use_accounts_revision() -> Signal<u64> {
    use_context::<AccountsRevision>().0
}
