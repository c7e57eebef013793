//! Widget components for the desktop app.

mod account_linking;
mod scheduled_transfers;

pub use account_linking::{
    link_error_message, AccountLinkingFlow, RemoveLinkedAccountButton, SessionAccount,
    VerifyAccountForm,
};
pub use scheduled_transfers::ScheduledTransfersPreview;
