//! Bank Widgets Core Library
//!
//! Client-side logic behind the linked account and scheduled transfer
//! widgets of a consumer banking app.
//!
//! ## Overview
//!
//! - **Account linking**: create a linked external account, unlink one,
//!   and verify a pending one with two micro-deposit amounts.
//! - **Verification form**: a typed state machine for the deposit form
//!   (edit → validate → submit → success/error).
//! - **Scheduled transfers preview**: fetch a month of occurrences, keep the
//!   upcoming active ones, order and truncate them, and look one month ahead
//!   when none remain.
//!
//! Widgets reach the backend through [`ApiClient`], generic over a
//! [`Transport`] so tests can run without a network.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bankwidgets_core::{ApiClient, ClientConfig, PreviewLoader, StringResources};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::load(None)?;
//!     let client = ApiClient::from_config(&config)?;
//!     let strings = StringResources::en_us();
//!
//!     let today = chrono::Local::now().date_naive();
//!     let preview = PreviewLoader::new(&client, &strings)
//!         .load(today, chrono::Utc::now())
//!         .await;
//!
//!     for transfer in &preview.ordered {
//!         println!("{} {}", transfer.header(&strings), transfer.summary(&strings));
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod lifecycle;
pub mod linking;
pub mod logging;
pub mod money;
pub mod resources;
pub mod scheduled;
pub mod verification;

// Re-exports
pub use config::ClientConfig;
pub use error::{WidgetError, WidgetResult};
pub use events::{AccountEvent, AccountEvents};
pub use http::{ApiClient, ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};
pub use lifecycle::{LoadGate, LoadTicket, MountGuard};
pub use linking::{
    add_account, classify_link_failure, delete_account, remove_linked_account, unlink_account,
    verify_account,
    AccountType, LinkRequest, LinkedAccountCreated, LinkedAccountRef, VerificationAttempt,
    VerificationTarget,
};
pub use money::{cents_to_numeric_dollars, dollars_to_cents};
pub use resources::StringResources;
pub use scheduled::{
    format_net_date, month_key, next_month, select_occurrences, PreviewLoader, PreviewState,
    TransferOccurrence, PREVIEW_LIMIT,
};
pub use verification::{
    announce_verified, deposits_valid, is_valid_deposit, DepositField, VerificationForm,
    VerificationPhase, SUCCESS_REFRESH_DELAY,
};
