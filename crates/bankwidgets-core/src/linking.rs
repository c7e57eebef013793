//! Linked account actions: create, unlink, verify.
//!
//! All three talk to the same resource:
//!
//! | Action  | Method | Path                                         |
//! |---------|--------|----------------------------------------------|
//! | create  | POST   | `api/linked-accounts/v1/accounts`            |
//! | unlink  | DELETE | `api/linked-accounts/v1/accounts/{type}/{id}`|
//! | verify  | PUT    | `api/linked-accounts/v1/accounts`            |
//!
//! Create failures propagate as typed errors. Unlink and verify failures are
//! logged and reported as `false`; the caller decides what, if anything, the
//! user sees.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{WidgetError, WidgetResult};
use crate::events::{AccountEvent, AccountEvents};
use crate::http::{ApiClient, ApiRequest, ApiResponse, Method, Transport};
use crate::money::dollars_to_cents;

/// Linked accounts resource, relative to the backend origin.
pub const LINKED_ACCOUNTS_URL: &str = "api/linked-accounts/v1/accounts";

/// Category of accounts linked through this flow (ACH-verified externals).
pub const EXTERNAL_ACCOUNT_CATEGORY: &str = "ach";

/// Kind of external deposit account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
}

impl AccountType {
    pub const ALL: [AccountType; 2] = [AccountType::Checking, AccountType::Savings];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "Checking",
            AccountType::Savings => "Savings",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "checking" => Ok(AccountType::Checking),
            "savings" => Ok(AccountType::Savings),
            _ => Err(WidgetError::InvalidArgument(format!(
                "Invalid account type '{}'. Must be one of: checking, savings",
                s
            ))),
        }
    }
}

/// Details the user enters to link an external account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkRequest {
    pub institution_name: String,
    pub routing_number: String,
    pub account_number: String,
    pub account_type: AccountType,
    pub account_name: String,
}

/// Wire body for account creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkedAccountBody<'a> {
    pub bank_name: &'a str,
    pub routing_number: &'a str,
    pub account_number: &'a str,
    pub account_type: AccountType,
    pub nickname: &'a str,
    pub is_internal_bank: bool,
    pub ownership: &'static str,
    pub username: &'static str,
    pub password: &'static str,
}

impl<'a> From<&'a LinkRequest> for CreateLinkedAccountBody<'a> {
    fn from(request: &'a LinkRequest) -> Self {
        Self {
            bank_name: &request.institution_name,
            routing_number: &request.routing_number,
            account_number: &request.account_number,
            account_type: request.account_type,
            nickname: &request.account_name,
            is_internal_bank: false,
            ownership: "Owner",
            username: "",
            password: "",
        }
    }
}

/// Map a failed account-creation status to an error kind.
///
/// The backend currently validates only the routing number, so every
/// rejection other than a 500 is reported as an invalid routing number.
/// Any new server-side field validation will be misreported here; this is
/// the single place to correct that mapping.
pub fn classify_link_failure(status: u16) -> WidgetError {
    match status {
        500 => WidgetError::Server,
        _ => WidgetError::InvalidRoutingNumber,
    }
}

/// Create a linked account. A 2xx response is returned unchanged.
pub async fn add_account<T: Transport>(
    client: &ApiClient<T>,
    request: &LinkRequest,
) -> WidgetResult<ApiResponse> {
    let body = CreateLinkedAccountBody::from(request);
    let response = client
        .api(ApiRequest::new(Method::Post, LINKED_ACCOUNTS_URL).with_json(&body)?)
        .await?;

    if !response.ok() {
        tracing::warn!(status = response.status, "linked account creation rejected");
        return Err(classify_link_failure(response.status));
    }
    Ok(response)
}

/// What the flow needs from a successful creation response.
///
/// Every field is optional; an unparseable body yields the default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkedAccountCreated {
    pub ach_id: Option<String>,
    pub linked_account_id: Option<String>,
    /// Backend account category used in unlink paths
    pub account_category: Option<String>,
    requires_verification: Option<bool>,
}

impl LinkedAccountCreated {
    pub fn from_response(response: &ApiResponse) -> Self {
        response.json().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "creation response body not understood");
            Self::default()
        })
    }

    /// Explicit flag if the backend sent one, otherwise "has an ACH id".
    pub fn requires_verification(&self) -> bool {
        self.requires_verification
            .unwrap_or_else(|| self.ach_id.is_some())
    }

    /// Reference for unlinking, when the backend returned an id.
    pub fn account_ref(&self) -> Option<LinkedAccountRef> {
        self.linked_account_id.as_ref().map(|id| LinkedAccountRef {
            account_type: self
                .account_category
                .clone()
                .unwrap_or_else(|| EXTERNAL_ACCOUNT_CATEGORY.to_string()),
            account_id: id.clone(),
        })
    }
}

/// Value after the first `=` of a `key=value` host argument.
fn arg_value<'a>(args: &[&'a str], index: usize, name: &str) -> WidgetResult<&'a str> {
    let arg = args
        .get(index)
        .ok_or_else(|| WidgetError::InvalidArgument(format!("missing {} argument", name)))?;
    let value = arg.split_once('=').map_or(*arg, |(_, v)| v);
    if value.is_empty() {
        return Err(WidgetError::InvalidArgument(format!("empty {} argument", name)));
    }
    Ok(value)
}

/// Account to unlink, as `{type}/{id}` in the resource path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedAccountRef {
    /// Backend account category (opaque, e.g. `ach`)
    pub account_type: String,
    pub account_id: String,
}

impl LinkedAccountRef {
    /// Parse host action arguments `[action, "LinkedAccountId=..", "AccountType=.."]`.
    pub fn from_args(args: &[&str]) -> WidgetResult<Self> {
        Ok(Self {
            account_id: arg_value(args, 1, "LinkedAccountId")?.to_string(),
            account_type: arg_value(args, 2, "AccountType")?.to_string(),
        })
    }

    pub fn url(&self) -> String {
        format!("{}/{}/{}", LINKED_ACCOUNTS_URL, self.account_type, self.account_id)
    }
}

/// Issue the DELETE. Failures are logged and reported as `false`.
pub async fn delete_account<T: Transport>(client: &ApiClient<T>, account: &LinkedAccountRef) -> bool {
    match client.api(ApiRequest::delete(account.url())).await {
        Ok(response) if response.ok() => true,
        Ok(response) => {
            tracing::error!(
                "Unknown external account delete error (status {})",
                response.status
            );
            false
        }
        Err(e) => {
            tracing::error!("External account delete request failed: {}", e);
            false
        }
    }
}

/// Delete `account` and announce the change.
///
/// A failed delete is logged only; the user sees nothing. Whether that
/// should surface an error is an open product decision.
pub async fn unlink_account<T: Transport>(
    client: &ApiClient<T>,
    events: &AccountEvents,
    account: &LinkedAccountRef,
) -> bool {
    let removed = delete_account(client, account).await;

    if removed {
        events.publish(AccountEvent::Unlinked {
            account_type: account.account_type.clone(),
            account_id: account.account_id.clone(),
        });
    } else {
        tracing::error!(
            "An error has occurred while deleting account. LinkedAccountId: {}",
            account.account_id
        );
    }
    removed
}

/// Unlink the account named by host arguments.
pub async fn remove_linked_account<T: Transport>(
    client: &ApiClient<T>,
    events: &AccountEvents,
    args: &[&str],
) -> WidgetResult<bool> {
    let account = LinkedAccountRef::from_args(args)?;
    Ok(unlink_account(client, events, &account).await)
}

/// Pending account the verification form is opened for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VerificationTarget {
    pub ach_id: String,
    pub account_name: String,
}

impl VerificationTarget {
    /// Parse host action arguments `[action, "AchId=..", "AccountName=.."]`.
    pub fn from_args(args: &[&str]) -> WidgetResult<Self> {
        Ok(Self {
            ach_id: arg_value(args, 1, "AchId")?.to_string(),
            account_name: args
                .get(2)
                .map(|a| a.split_once('=').map_or(*a, |(_, v)| v).to_string())
                .unwrap_or_default(),
        })
    }
}

/// Two challenge deposits for one pending account, in cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationAttempt {
    pub ach_id: String,
    pub deposit_one_cents: i64,
    pub deposit_two_cents: i64,
}

impl VerificationAttempt {
    /// Convert user-entered dollar strings. Both amounts must be positive.
    pub fn from_inputs(ach_id: impl Into<String>, deposit_one: &str, deposit_two: &str) -> WidgetResult<Self> {
        let deposit_one_cents = dollars_to_cents(deposit_one)?;
        let deposit_two_cents = dollars_to_cents(deposit_two)?;
        for (raw, cents) in [(deposit_one, deposit_one_cents), (deposit_two, deposit_two_cents)] {
            if cents <= 0 {
                return Err(WidgetError::InvalidAmount(raw.to_string()));
            }
        }
        Ok(Self {
            ach_id: ach_id.into(),
            deposit_one_cents,
            deposit_two_cents,
        })
    }
}

/// Wire body for verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyLinkedAccountRequest<'a> {
    pub ach_id: &'a str,
    pub challenge_amount1: i64,
    pub challenge_amount2: i64,
}

impl<'a> From<&'a VerificationAttempt> for VerifyLinkedAccountRequest<'a> {
    fn from(attempt: &'a VerificationAttempt) -> Self {
        Self {
            ach_id: &attempt.ach_id,
            challenge_amount1: attempt.deposit_one_cents,
            challenge_amount2: attempt.deposit_two_cents,
        }
    }
}

/// Submit the challenge deposits. Failures are logged and reported as `false`.
pub async fn verify_account<T: Transport>(client: &ApiClient<T>, attempt: &VerificationAttempt) -> bool {
    let request = match ApiRequest::new(Method::Put, LINKED_ACCOUNTS_URL)
        .with_json(&VerifyLinkedAccountRequest::from(attempt))
    {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Could not encode verification request: {}", e);
            return false;
        }
    };

    match client.api(request).await {
        Ok(response) if response.ok() => true,
        Ok(response) => {
            tracing::error!(
                "Unknown external account verification error (status {})",
                response.status
            );
            false
        }
        Err(e) => {
            tracing::error!("External account verification request failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_500_is_server_error() {
        assert!(matches!(classify_link_failure(500), WidgetError::Server));
    }

    #[test]
    fn classify_everything_else_as_routing_number() {
        for status in [400, 401, 403, 404, 409, 422, 501, 502, 503] {
            assert!(
                matches!(classify_link_failure(status), WidgetError::InvalidRoutingNumber),
                "status {}",
                status
            );
        }
    }

    #[test]
    fn create_body_has_fixed_defaults() {
        let request = LinkRequest {
            institution_name: "First Bank".to_string(),
            routing_number: "011000015".to_string(),
            account_number: "123456789".to_string(),
            account_type: AccountType::Savings,
            account_name: "Rainy day".to_string(),
        };
        let json = serde_json::to_value(CreateLinkedAccountBody::from(&request)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "bankName": "First Bank",
                "routingNumber": "011000015",
                "accountNumber": "123456789",
                "accountType": "Savings",
                "nickname": "Rainy day",
                "isInternalBank": false,
                "ownership": "Owner",
                "username": "",
                "password": ""
            })
        );
    }

    #[test]
    fn account_type_parses_case_insensitively() {
        assert_eq!("CHECKING".parse::<AccountType>().unwrap(), AccountType::Checking);
        assert_eq!(" savings ".parse::<AccountType>().unwrap(), AccountType::Savings);
        assert!("brokerage".parse::<AccountType>().is_err());
    }

    #[test]
    fn account_ref_from_host_args() {
        let account =
            LinkedAccountRef::from_args(&["remove", "LinkedAccountId=77", "AccountType=ach"]).unwrap();
        assert_eq!(account.account_id, "77");
        assert_eq!(account.account_type, "ach");
        assert_eq!(account.url(), "api/linked-accounts/v1/accounts/ach/77");
    }

    #[test]
    fn account_ref_value_keeps_later_equals() {
        let account =
            LinkedAccountRef::from_args(&["remove", "LinkedAccountId=a=b", "AccountType=ach"]).unwrap();
        assert_eq!(account.account_id, "a=b");
    }

    #[test]
    fn account_ref_requires_both_args() {
        assert!(LinkedAccountRef::from_args(&["remove", "LinkedAccountId=77"]).is_err());
        assert!(LinkedAccountRef::from_args(&["remove", "LinkedAccountId=", "AccountType=ach"]).is_err());
    }

    #[test]
    fn verification_target_from_host_args() {
        let target = VerificationTarget::from_args(&["verify", "AchId=ach-9", "AccountName=My Checking"]).unwrap();
        assert_eq!(target.ach_id, "ach-9");
        assert_eq!(target.account_name, "My Checking");

        let unnamed = VerificationTarget::from_args(&["verify", "AchId=ach-9"]).unwrap();
        assert_eq!(unnamed.account_name, "");
    }

    #[test]
    fn attempt_converts_to_cents() {
        let attempt = VerificationAttempt::from_inputs("ach-1", "0.32", "0.4").unwrap();
        assert_eq!(attempt.deposit_one_cents, 32);
        assert_eq!(attempt.deposit_two_cents, 40);

        let json = serde_json::to_value(VerifyLinkedAccountRequest::from(&attempt)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"AchId": "ach-1", "ChallengeAmount1": 32, "ChallengeAmount2": 40})
        );
    }

    #[test]
    fn attempt_rejects_zero() {
        assert!(matches!(
            VerificationAttempt::from_inputs("ach-1", "0.00", "0.10"),
            Err(WidgetError::InvalidAmount(_))
        ));
    }

    #[test]
    fn created_requires_verification_defaults_to_ach_presence() {
        let with_ach = LinkedAccountCreated::from_response(&ApiResponse::new(200, r#"{"achId": "a1"}"#));
        assert!(with_ach.requires_verification());

        let explicit = LinkedAccountCreated::from_response(&ApiResponse::new(
            200,
            r#"{"achId": "a1", "requiresVerification": false}"#,
        ));
        assert!(!explicit.requires_verification());

        let empty = LinkedAccountCreated::from_response(&ApiResponse::new(201, ""));
        assert_eq!(empty, LinkedAccountCreated::default());
        assert!(!empty.requires_verification());
        assert!(empty.account_ref().is_none());
    }

    #[test]
    fn created_account_ref_defaults_category() {
        let created = LinkedAccountCreated::from_response(&ApiResponse::new(
            200,
            r#"{"linkedAccountId": "91"}"#,
        ));
        assert_eq!(
            created.account_ref(),
            Some(LinkedAccountRef {
                account_type: "ach".to_string(),
                account_id: "91".to_string(),
            })
        );
    }
}
