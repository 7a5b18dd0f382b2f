mod common;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use phone_bazaar::entities::{RechargeStatus, recharge_transaction};
use phone_bazaar::payments::PaymentGateway;
use serde_json::json;

fn user_token() -> String {
    common::token_for("user-r", "r@example.com", "Ravi")
}

fn recharge_body() -> serde_json::Value {
    json!({
        "mobileNumber": "9876543210",
        "operator": "airtel",
        "planType": "prepaid",
        "amount": 299,
        "planDetails": { "validity": "28 days", "data": "1.5GB/day" },
        "paymentMethod": "upi"
    })
}

struct DecliningGateway;

#[async_trait]
impl PaymentGateway for DecliningGateway {
    fn name(&self) -> &'static str {
        "declining"
    }

    async fn settle(&self, _txn: &recharge_transaction::Model) -> anyhow::Result<RechargeStatus> {
        Ok(RechargeStatus::Failed)
    }
}

struct UnreachableGateway;

#[async_trait]
impl PaymentGateway for UnreachableGateway {
    fn name(&self) -> &'static str {
        "unreachable"
    }

    async fn settle(&self, _txn: &recharge_transaction::Model) -> anyhow::Result<RechargeStatus> {
        Err(anyhow::anyhow!("connection refused"))
    }
}

#[tokio::test]
async fn test_recharge_is_settled_by_gateway() {
    let app = common::test_app().await;

    let (status, body) = common::post_json_with_auth(&app, "/api/recharge", &recharge_body(), &user_token()).await;
    assert_eq!(status, StatusCode::CREATED, "body: {body}");

    let v = common::parse(&body);
    assert_eq!(v["status"], "success");
    assert_eq!(v["userId"], "user-r");
    assert_eq!(v["operator"], "airtel");
    assert_eq!(v["planType"], "prepaid");
    assert_eq!(v["amount"], 299.0);
    assert_eq!(v["planDetails"]["validity"], "28 days");
    assert_eq!(v["paymentMethod"], "upi");
    let txn_id = v["transactionId"].as_str().unwrap_or_default();
    assert!(txn_id.starts_with("TXN"), "transaction id: {txn_id}");
    assert!(txn_id[3..].bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
}

#[tokio::test]
async fn test_transaction_ids_are_server_generated_and_unique() {
    let app = common::test_app().await;

    let mut body = recharge_body();
    body["transactionId"] = json!("TXN-CLIENT-CHOSEN");

    let mut ids = HashSet::new();
    for _ in 0..5 {
        let (status, resp) = common::post_json_with_auth(&app, "/api/recharge", &body, &user_token()).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = common::parse(&resp)["transactionId"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        assert_ne!(id, "TXN-CLIENT-CHOSEN");
        ids.insert(id);
    }
    assert_eq!(ids.len(), 5);
}

#[tokio::test]
async fn test_operator_is_detected_when_omitted() {
    let app = common::test_app().await;

    let cases = [
        ("7012345678", "airtel"),
        ("+91 8912345678", "jio"),
        ("9012345678", "vi"),
        ("6012345678", "bsnl"),
    ];
    for (number, operator) in cases {
        let body = json!({ "mobileNumber": number, "planType": "prepaid", "amount": 199 });
        let (status, resp) = common::post_json_with_auth(&app, "/api/recharge", &body, &user_token()).await;
        assert_eq!(status, StatusCode::CREATED, "{number}: {resp}");
        assert_eq!(common::parse(&resp)["operator"], operator, "{number}");
    }
}

#[tokio::test]
async fn test_mobile_number_is_stored_as_national_number() {
    let app = common::test_app().await;

    for number in ["+91 98765 43210", "919876543210", "9876543210"] {
        let mut body = recharge_body();
        body["mobileNumber"] = json!(number);
        let (status, resp) = common::post_json_with_auth(&app, "/api/recharge", &body, &user_token()).await;
        assert_eq!(status, StatusCode::CREATED, "{number}: {resp}");
        assert_eq!(common::parse(&resp)["mobileNumber"], "9876543210", "{number}");
    }
}

#[tokio::test]
async fn test_recharge_validation() {
    let app = common::test_app().await;

    let body = json!({ "mobileNumber": "12345", "planType": "prepaid", "amount": 0 });
    let (status, resp) = common::post_json_with_auth(&app, "/api/recharge", &body, &user_token()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let v = common::parse(&resp);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    assert!(v["error"]["fields"]["mobileNumber"].is_array());
    assert!(v["error"]["fields"]["amount"].is_array());

    let body = json!({ "mobileNumber": "9876543210", "planType": "broadband", "amount": 10 });
    let (status, _) = common::post_json_with_auth(&app, "/api/recharge", &body, &user_token()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, history) = common::get_with_auth(&app, "/api/recharge/history", &user_token()).await;
    assert_eq!(common::parse(&history), json!([]));
}

#[tokio::test]
async fn test_declined_payment_is_recorded_as_failed() {
    let app = common::app_for(common::test_state_with_gateway(Arc::new(DecliningGateway)).await);

    let (status, body) = common::post_json_with_auth(&app, "/api/recharge", &recharge_body(), &user_token()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(common::parse(&body)["status"], "failed");
}

#[tokio::test]
async fn test_gateway_error_leaves_transaction_pending() {
    let app = common::app_for(common::test_state_with_gateway(Arc::new(UnreachableGateway)).await);

    let (status, body) = common::post_json_with_auth(&app, "/api/recharge", &recharge_body(), &user_token()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let v = common::parse(&body);
    assert_eq!(v["error"]["code"], "INTERNAL_ERROR");
    assert!(!body.contains("connection refused"));

    let (_, history) = common::get_with_auth(&app, "/api/recharge/history", &user_token()).await;
    let history = common::parse(&history);
    assert_eq!(history[0]["status"], "pending");
}

#[tokio::test]
async fn test_history_is_per_user_and_newest_first() {
    let app = common::test_app().await;
    let other = common::token_for("user-s", "s@example.com", "Sita");

    let mut expected = Vec::new();
    for amount in [99, 199, 299] {
        let mut body = recharge_body();
        body["amount"] = json!(amount);
        let (_, resp) = common::post_json_with_auth(&app, "/api/recharge", &body, &user_token()).await;
        expected.push(common::parse(&resp)["id"].as_i64().unwrap_or_default());
    }
    common::post_json_with_auth(&app, "/api/recharge", &recharge_body(), &other).await;
    expected.reverse();

    let (status, body) = common::get_with_auth(&app, "/api/recharge/history", &user_token()).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = common::parse(&body)
        .as_array()
        .map(|items| items.iter().filter_map(|t| t["id"].as_i64()).collect())
        .unwrap_or_default();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_recharge_detail_is_owner_only() {
    let app = common::test_app().await;
    let other = common::token_for("user-s", "s@example.com", "Sita");

    let (_, resp) = common::post_json_with_auth(&app, "/api/recharge", &recharge_body(), &user_token()).await;
    let id = common::parse(&resp)["id"].as_i64().unwrap_or_default();
    let uri = format!("/api/recharge/{id}");

    let (status, body) = common::get_with_auth(&app, &uri, &user_token()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::parse(&body)["id"], id);

    let (status, _) = common::get_with_auth(&app, &uri, &other).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
