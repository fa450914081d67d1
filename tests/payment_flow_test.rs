//! Payment-confirmation workflow: cash auto-confirm, transfer pending,
//! owner decisions and the visitor-facing status report.

mod common;

use axum::http::Method;
use common::{response_json, TestApp};
use serde_json::{json, Value};

async fn submit_payment(app: &TestApp, user_id: i64, facility_id: i64, method: &str) -> Value {
    let response = app
        .request(
            Method::POST,
            "/api/v1/payments",
            Some(json!({
                "user_id": user_id,
                "facility_id": facility_id,
                "method": method,
                "amount": 5000,
                "transfer_image_path": if method == "transfer" {
                    Some("uploads/proof.jpg")
                } else {
                    None
                }
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    response_json(response).await
}

async fn payment_status(app: &TestApp, user_id: i64, facility_id: i64) -> Value {
    let response = app
        .request(
            Method::GET,
            &format!("/api/v1/users/{}/payment-status/{}", user_id, facility_id),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    response_json(response).await
}

#[tokio::test]
async fn cash_payment_confirms_immediately() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility(
            "owner@example.vn",
            "Cash Stop",
            json!({ "is_free": false, "price": 5000 }),
        )
        .await;
    let user_id = app.seed_guest("cash_payer").await;

    let body = submit_payment(&app, user_id, facility_id, "cash").await;
    assert_eq!(body["data"]["status"].as_str(), Some("confirmed"));

    let status = payment_status(&app, user_id, facility_id).await;
    assert_eq!(status["data"]["payment_confirmed"].as_bool(), Some(true));
}

#[tokio::test]
async fn transfer_payment_pends_and_notifies_the_owner() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility(
            "owner@example.vn",
            "Transfer Stop",
            json!({ "is_free": false, "price": 5000 }),
        )
        .await;
    let user_id = app.seed_guest("transfer_payer").await;

    let body = submit_payment(&app, user_id, facility_id, "transfer").await;
    assert_eq!(body["data"]["status"].as_str(), Some("pending"));

    // A pending transfer does not unlock the facility.
    let status = payment_status(&app, user_id, facility_id).await;
    assert_eq!(status["data"]["payment_confirmed"].as_bool(), Some(false));
    assert_eq!(status["data"]["has_pending_payment"].as_bool(), Some(true));

    let blocked = app
        .request(
            Method::POST,
            &format!("/api/v1/users/{}/start-using/{}", user_id, facility_id),
            None,
        )
        .await;
    assert_eq!(blocked.status(), 402);

    let notifications = app.owner_notifications("owner@example.vn").await;
    assert!(notifications
        .iter()
        .any(|n| n["kind"].as_str() == Some("payment_confirmation")
            && n["message"].as_str().unwrap_or_default().contains("awaits confirmation")));
}

#[tokio::test]
async fn owner_confirmation_stamps_the_timestamp_and_unlocks() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility(
            "owner@example.vn",
            "Confirm Stop",
            json!({ "is_free": false, "price": 5000 }),
        )
        .await;
    let user_id = app.seed_guest("confirmed_payer").await;

    let body = submit_payment(&app, user_id, facility_id, "transfer").await;
    let payment_id = body["data"]["id"].as_i64().expect("payment id");

    let decision = app
        .request(
            Method::POST,
            &format!("/api/v1/payments/{}/confirm", payment_id),
            Some(json!({ "action": "confirm" })),
        )
        .await;
    assert_eq!(decision.status(), 200);
    let decision_body = response_json(decision).await;
    assert_eq!(decision_body["data"]["status"].as_str(), Some("confirmed"));

    let status = payment_status(&app, user_id, facility_id).await;
    assert_eq!(status["data"]["payment_confirmed"].as_bool(), Some(true));
    assert!(!status["data"]["confirmed_at"].is_null());

    let allowed = app
        .request(
            Method::POST,
            &format!("/api/v1/users/{}/start-using/{}", user_id, facility_id),
            None,
        )
        .await;
    assert_eq!(allowed.status(), 200);

    // The owner dashboard view carries resolved names and the timestamp.
    let owner_payments = app
        .request(
            Method::GET,
            "/api/v1/owner/owner@example.vn/payments",
            None,
        )
        .await;
    assert_eq!(owner_payments.status(), 200);
    let owner_body = response_json(owner_payments).await;
    let entries = owner_body["data"].as_array().expect("payments");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["user_name"].as_str(), Some("confirmed_payer"));
    assert_eq!(entries[0]["facility_name"].as_str(), Some("Confirm Stop"));
    assert!(!entries[0]["confirmed_at"].is_null());
}

#[tokio::test]
async fn rejection_leaves_no_timestamp_and_keeps_the_gate_closed() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility(
            "owner@example.vn",
            "Reject Stop",
            json!({ "is_free": false, "price": 5000 }),
        )
        .await;
    let user_id = app.seed_guest("rejected_payer").await;

    let body = submit_payment(&app, user_id, facility_id, "transfer").await;
    let payment_id = body["data"]["id"].as_i64().expect("payment id");

    let decision = app
        .request(
            Method::POST,
            &format!("/api/v1/payments/{}/confirm", payment_id),
            Some(json!({ "action": "reject" })),
        )
        .await;
    assert_eq!(decision.status(), 200);
    let decision_body = response_json(decision).await;
    assert_eq!(decision_body["data"]["status"].as_str(), Some("rejected"));

    let blocked = app
        .request(
            Method::POST,
            &format!("/api/v1/users/{}/start-using/{}", user_id, facility_id),
            None,
        )
        .await;
    assert_eq!(blocked.status(), 402);

    // The visitor-facing list shows the rejection with no timestamp.
    let user_payments = app
        .request(
            Method::GET,
            &format!("/api/v1/users/{}/payments", user_id),
            None,
        )
        .await;
    let user_body = response_json(user_payments).await;
    let entries = user_body["data"].as_array().expect("payments");
    assert_eq!(entries[0]["status"].as_str(), Some("rejected"));
    assert!(entries[0]["confirmed_at"].is_null());

    let notifications = app.owner_notifications("owner@example.vn").await;
    assert!(notifications
        .iter()
        .any(|n| n["kind"].as_str() == Some("payment_status")
            && n["message"].as_str().unwrap_or_default().contains("was rejected")));
}

#[tokio::test]
async fn unknown_decision_action_is_rejected() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility(
            "owner@example.vn",
            "Action Stop",
            json!({ "is_free": false, "price": 5000 }),
        )
        .await;
    let user_id = app.seed_guest("action_payer").await;

    let body = submit_payment(&app, user_id, facility_id, "transfer").await;
    let payment_id = body["data"]["id"].as_i64().expect("payment id");

    let decision = app
        .request(
            Method::POST,
            &format!("/api/v1/payments/{}/confirm", payment_id),
            Some(json!({ "action": "escalate" })),
        )
        .await;
    assert_eq!(decision.status(), 400);

    let missing = app
        .request(
            Method::POST,
            "/api/v1/payments/9999/confirm",
            Some(json!({ "action": "confirm" })),
        )
        .await;
    assert_eq!(missing.status(), 404);
}
