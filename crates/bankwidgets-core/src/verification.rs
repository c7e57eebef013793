//! Micro-deposit verification form.
//!
//! ```text
//!            edit (valid)              submit             verified
//!  Editing ───────────────► Valid ───────────────► Submitting ───────► Success
//!     │                     ▲  │                      │
//!     │ edit (invalid)      │  │ edit (invalid)       │ rejected
//!     ▼                     │  ▼                      ▼
//!  Invalid ◄────────────────┴─ ...               Error (banner, retry)
//! ```
//!
//! Every edit re-validates both fields. Submit is only reachable from `Valid`
//! or `Error`, and while `Submitting` both controls are disabled and edits are
//! ignored. The error banner is sticky: once a submission fails it stays up
//! for the life of the form, even across later edits.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use crate::error::{WidgetError, WidgetResult};
use crate::events::{AccountEvent, AccountEvents};
use crate::http::{ApiClient, Transport};
use crate::linking::{verify_account, VerificationAttempt, VerificationTarget};

/// Non-negative decimal with at most two places.
pub const DEPOSIT_PATTERN: &str = r"^[0-9]+(\.[0-9]{1,2})?$";

/// Pause between closing the modal and refreshing accounts, so the close
/// animation is seen before the view changes.
pub const SUCCESS_REFRESH_DELAY: Duration = Duration::from_millis(600);

fn deposit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DEPOSIT_PATTERN).expect("deposit pattern is a valid regex"))
}

/// One deposit field: non-empty, matches [`DEPOSIT_PATTERN`], strictly positive.
///
/// Positivity is read from the digits, so there is no upper bound here.
/// Amounts too large for `i64` cents are refused later by
/// [`VerificationAttempt::from_inputs`].
pub fn is_valid_deposit(input: &str) -> bool {
    !input.is_empty()
        && deposit_regex().is_match(input)
        && input.bytes().any(|b| matches!(b, b'1'..=b'9'))
}

/// Both deposit fields valid at once.
pub fn deposits_valid(deposit_one: &str, deposit_two: &str) -> bool {
    is_valid_deposit(deposit_one) && is_valid_deposit(deposit_two)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationPhase {
    /// Nothing entered yet
    Editing,
    Invalid,
    Valid,
    /// Request in flight
    Submitting,
    Success,
    /// Last submission was rejected; the user may edit or retry
    Error,
}

/// Which deposit field an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositField {
    First,
    Second,
}

/// State of one verification form instance.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationForm {
    target: VerificationTarget,
    deposit_one: String,
    deposit_two: String,
    phase: VerificationPhase,
    error_returned: bool,
}

impl VerificationForm {
    pub fn new(target: VerificationTarget) -> Self {
        Self {
            target,
            deposit_one: String::new(),
            deposit_two: String::new(),
            phase: VerificationPhase::Editing,
            error_returned: false,
        }
    }

    pub fn target(&self) -> &VerificationTarget {
        &self.target
    }

    pub fn phase(&self) -> VerificationPhase {
        self.phase
    }

    pub fn deposit(&self, field: DepositField) -> &str {
        match field {
            DepositField::First => &self.deposit_one,
            DepositField::Second => &self.deposit_two,
        }
    }

    /// Record a keystroke and re-validate. Ignored while submitting or done.
    pub fn edit(&mut self, field: DepositField, value: impl Into<String>) -> VerificationPhase {
        if !self.inputs_enabled() {
            tracing::debug!(phase = ?self.phase, "ignoring edit");
            return self.phase;
        }

        match field {
            DepositField::First => self.deposit_one = value.into(),
            DepositField::Second => self.deposit_two = value.into(),
        }
        self.phase = if deposits_valid(&self.deposit_one, &self.deposit_two) {
            VerificationPhase::Valid
        } else {
            VerificationPhase::Invalid
        };
        self.phase
    }

    pub fn submit_enabled(&self) -> bool {
        matches!(self.phase, VerificationPhase::Valid | VerificationPhase::Error)
            && deposits_valid(&self.deposit_one, &self.deposit_two)
    }

    pub fn cancel_enabled(&self) -> bool {
        self.phase != VerificationPhase::Submitting
    }

    pub fn inputs_enabled(&self) -> bool {
        !matches!(
            self.phase,
            VerificationPhase::Submitting | VerificationPhase::Success
        )
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == VerificationPhase::Submitting
    }

    /// Whether the inline error banner is shown.
    pub fn show_error_banner(&self) -> bool {
        self.error_returned
    }

    /// `Valid`/`Error` → `Submitting`, yielding the attempt to send.
    pub fn begin_submit(&mut self) -> WidgetResult<VerificationAttempt> {
        if !self.submit_enabled() {
            return Err(WidgetError::InvalidTransition(format!(
                "cannot submit from {:?}",
                self.phase
            )));
        }
        let attempt =
            VerificationAttempt::from_inputs(&self.target.ach_id, &self.deposit_one, &self.deposit_two)?;
        self.phase = VerificationPhase::Submitting;
        Ok(attempt)
    }

    /// `Submitting` → `Success` or `Error`.
    pub fn finish_submit(&mut self, verified: bool) -> WidgetResult<VerificationPhase> {
        if self.phase != VerificationPhase::Submitting {
            return Err(WidgetError::InvalidTransition(format!(
                "no submission in flight ({:?})",
                self.phase
            )));
        }
        if verified {
            self.phase = VerificationPhase::Success;
        } else {
            self.error_returned = true;
            self.phase = VerificationPhase::Error;
        }
        Ok(self.phase)
    }

    /// Validate a cancel request. No network call is involved.
    pub fn cancel(&self) -> WidgetResult<()> {
        if self.cancel_enabled() {
            Ok(())
        } else {
            Err(WidgetError::InvalidTransition(
                "cannot cancel while submitting".to_string(),
            ))
        }
    }

    /// Drive one full submission against the backend.
    pub async fn submit<T: Transport>(&mut self, client: &ApiClient<T>) -> WidgetResult<VerificationPhase> {
        let attempt = self.begin_submit()?;
        let verified = verify_account(client, &attempt).await;
        self.finish_submit(verified)
    }
}

/// After the modal closes, wait `delay` and announce the verified account.
pub async fn announce_verified(events: &AccountEvents, ach_id: impl Into<String>, delay: Duration) {
    tokio::time::sleep(delay).await;
    events.publish(AccountEvent::Verified {
        ach_id: ach_id.into(),
    });
}
