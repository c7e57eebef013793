//! Account linking actions against an in-memory backend.

mod common;

use bankwidgets_core::http::Method;
use bankwidgets_core::linking::LINKED_ACCOUNTS_URL;
use bankwidgets_core::{
    add_account, delete_account, remove_linked_account, verify_account, AccountEvent,
    AccountEvents, AccountType, DepositField, LinkRequest, LinkedAccountRef, VerificationAttempt,
    VerificationForm, VerificationPhase, VerificationTarget, WidgetError,
};
use common::{client, Reply};

fn link_request() -> LinkRequest {
    LinkRequest {
        institution_name: "First Bank".to_string(),
        routing_number: "011000015".to_string(),
        account_number: "987654321".to_string(),
        account_type: AccountType::Checking,
        account_name: "Bills".to_string(),
    }
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_add_account_success_returns_raw_response() {
    let client = client([Reply::Status(201, r#"{"achId":"ach-5"}"#.to_string())]);

    let response = add_account(&client, &link_request()).await.unwrap();
    assert_eq!(response.status, 201);
    assert_eq!(response.body, r#"{"achId":"ach-5"}"#);

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].url, LINKED_ACCOUNTS_URL);
    let body = requests[0].body.as_ref().unwrap();
    assert_eq!(body["bankName"], "First Bank");
    assert_eq!(body["ownership"], "Owner");
    assert_eq!(body["isInternalBank"], false);
}

#[tokio::test]
async fn test_add_account_500_is_server_error() {
    let client = client([Reply::status(500)]);
    let err = add_account(&client, &link_request()).await.unwrap_err();
    assert!(matches!(err, WidgetError::Server));
}

#[tokio::test]
async fn test_add_account_other_failures_are_routing_number() {
    for status in [400, 404, 422, 503] {
        let client = client([Reply::status(status)]);
        let err = add_account(&client, &link_request()).await.unwrap_err();
        assert!(
            matches!(err, WidgetError::InvalidRoutingNumber),
            "status {} gave {:?}",
            status,
            err
        );
    }
}

#[tokio::test]
async fn test_add_account_network_failure_propagates() {
    let client = client([Reply::NetworkDown]);
    let err = add_account(&client, &link_request()).await.unwrap_err();
    assert!(matches!(err, WidgetError::Network(_)));
}

// ============================================================================
// Unlink
// ============================================================================

#[tokio::test]
async fn test_delete_account_uses_type_and_id_path() {
    let client = client([Reply::status(204)]);
    let account = LinkedAccountRef {
        account_type: "ach".to_string(),
        account_id: "77".to_string(),
    };

    assert!(delete_account(&client, &account).await);
    let requests = client.transport().requests();
    assert_eq!(requests[0].method, Method::Delete);
    assert_eq!(requests[0].url, "api/linked-accounts/v1/accounts/ach/77");
    assert!(requests[0].body.is_none());
}

#[tokio::test]
async fn test_remove_linked_account_publishes_change() {
    let client = client([Reply::status(200)]);
    let events = AccountEvents::new();
    let mut rx = events.subscribe();

    let removed = remove_linked_account(&client, &events, &["remove", "LinkedAccountId=77", "AccountType=ach"])
        .await
        .unwrap();

    assert!(removed);
    assert_eq!(
        rx.try_recv().unwrap(),
        AccountEvent::Unlinked {
            account_type: "ach".to_string(),
            account_id: "77".to_string(),
        }
    );
}

#[tokio::test]
async fn test_remove_linked_account_failure_is_silent() {
    let client = client([Reply::status(500)]);
    let events = AccountEvents::new();
    let mut rx = events.subscribe();

    let removed = remove_linked_account(&client, &events, &["remove", "LinkedAccountId=77", "AccountType=ach"])
        .await
        .unwrap();

    assert!(!removed);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_remove_linked_account_bad_args_sends_nothing() {
    let client = client([]);
    let events = AccountEvents::new();
    let result = remove_linked_account(&client, &events, &["remove"]).await;
    assert!(matches!(result, Err(WidgetError::InvalidArgument(_))));
    assert!(client.transport().requests().is_empty());
}

// ============================================================================
// Verify
// ============================================================================

#[tokio::test]
async fn test_verify_account_sends_cents() {
    let client = client([Reply::status(200)]);
    let attempt = VerificationAttempt::from_inputs("ach-5", "0.12", "0.3").unwrap();

    assert!(verify_account(&client, &attempt).await);
    let requests = client.transport().requests();
    assert_eq!(requests[0].method, Method::Put);
    assert_eq!(requests[0].url, LINKED_ACCOUNTS_URL);
    assert_eq!(
        requests[0].body,
        Some(serde_json::json!({"AchId": "ach-5", "ChallengeAmount1": 12, "ChallengeAmount2": 30}))
    );
}

#[tokio::test]
async fn test_verify_account_failure_is_false() {
    let client = client([Reply::status(400), Reply::NetworkDown]);
    let attempt = VerificationAttempt::from_inputs("ach-5", "0.12", "0.3").unwrap();
    assert!(!verify_account(&client, &attempt).await);
    assert!(!verify_account(&client, &attempt).await);
}

#[tokio::test]
async fn test_form_retry_after_rejection() {
    let client = client([Reply::status(400), Reply::status(200)]);
    let mut form = VerificationForm::new(VerificationTarget {
        ach_id: "ach-5".to_string(),
        account_name: "Bills".to_string(),
    });
    form.edit(DepositField::First, "0.12");
    form.edit(DepositField::Second, "0.30");

    assert_eq!(form.submit(&client).await.unwrap(), VerificationPhase::Error);
    assert!(form.show_error_banner());

    assert_eq!(form.submit(&client).await.unwrap(), VerificationPhase::Success);
    assert_eq!(client.transport().requests().len(), 2);
}

#[tokio::test]
async fn test_form_invalid_never_hits_network() {
    let client = client([]);
    let mut form = VerificationForm::new(VerificationTarget::default());
    form.edit(DepositField::First, "0.12");

    assert!(matches!(
        form.submit(&client).await,
        Err(WidgetError::InvalidTransition(_))
    ));
    assert!(client.transport().requests().is_empty());
}
