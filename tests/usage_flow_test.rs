//! Usage-session workflow: occupancy counting, payment gating and history.

mod common;

use axum::http::Method;
use common::{response_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn start_and_stop_move_the_occupancy_counter() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility("owner@example.vn", "Free Stop", json!({}))
        .await;
    let user_id = app.seed_guest("visitor1").await;

    let start = app
        .request(
            Method::POST,
            &format!("/api/v1/users/{}/start-using/{}", user_id, facility_id),
            None,
        )
        .await;
    assert_eq!(start.status(), 200);
    assert_eq!(app.current_users(facility_id).await, 1);

    let stop = app
        .request(
            Method::POST,
            &format!("/api/v1/users/{}/stop-using", user_id),
            None,
        )
        .await;
    assert_eq!(stop.status(), 200);
    assert_eq!(app.current_users(facility_id).await, 0);

    // Stopping again is a safe no-op; the counter never goes negative.
    let stop_again = app
        .request(
            Method::POST,
            &format!("/api/v1/users/{}/stop-using", user_id),
            None,
        )
        .await;
    assert_eq!(stop_again.status(), 200);
    assert_eq!(app.current_users(facility_id).await, 0);
}

#[tokio::test]
async fn repeated_start_opens_a_second_session() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility("owner@example.vn", "Busy Stop", json!({}))
        .await;
    let user_id = app.seed_guest("visitor2").await;

    for _ in 0..2 {
        let start = app
            .request(
                Method::POST,
                &format!("/api/v1/users/{}/start-using/{}", user_id, facility_id),
                None,
            )
            .await;
        assert_eq!(start.status(), 200);
    }
    assert_eq!(app.current_users(facility_id).await, 2);

    // One stop closes the first open session and clears the visitor; the
    // counter keeps the remainder.
    let stop = app
        .request(
            Method::POST,
            &format!("/api/v1/users/{}/stop-using", user_id),
            None,
        )
        .await;
    assert_eq!(stop.status(), 200);
    assert_eq!(app.current_users(facility_id).await, 1);
}

#[tokio::test]
async fn priced_facility_requires_confirmed_payment() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility(
            "owner@example.vn",
            "Paid Stop",
            json!({ "is_free": false, "price": 5000 }),
        )
        .await;
    let user_id = app.seed_guest("visitor3").await;

    let blocked = app
        .request(
            Method::POST,
            &format!("/api/v1/users/{}/start-using/{}", user_id, facility_id),
            None,
        )
        .await;
    assert_eq!(blocked.status(), 402);
    assert_eq!(app.current_users(facility_id).await, 0);

    // Cash settles immediately and unlocks the facility.
    let pay = app
        .request(
            Method::POST,
            "/api/v1/payments",
            Some(json!({
                "user_id": user_id,
                "facility_id": facility_id,
                "method": "cash",
                "amount": 5000
            })),
        )
        .await;
    assert_eq!(pay.status(), 201);

    let allowed = app
        .request(
            Method::POST,
            &format!("/api/v1/users/{}/start-using/{}", user_id, facility_id),
            None,
        )
        .await;
    assert_eq!(allowed.status(), 200);
    assert_eq!(app.current_users(facility_id).await, 1);
}

#[tokio::test]
async fn history_records_the_closed_session() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility("owner@example.vn", "History Stop", json!({}))
        .await;
    let user_id = app.seed_guest("visitor4").await;

    app.request(
        Method::POST,
        &format!("/api/v1/users/{}/start-using/{}", user_id, facility_id),
        None,
    )
    .await;
    app.request(
        Method::POST,
        &format!("/api/v1/users/{}/stop-using", user_id),
        None,
    )
    .await;

    let history = app
        .request(
            Method::GET,
            &format!("/api/v1/users/{}/history", user_id),
            None,
        )
        .await;
    assert_eq!(history.status(), 200);
    let body = response_json(history).await;
    let sessions = body["data"]["usage_history"].as_array().expect("sessions");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["facility_name"].as_str(), Some("History Stop"));
    assert!(!sessions[0]["end_time"].is_null());
    assert!(sessions[0]["duration_minutes"].is_i64());
}

#[tokio::test]
async fn unknown_user_or_facility_is_rejected() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility("owner@example.vn", "Edge Stop", json!({}))
        .await;
    let user_id = app.seed_guest("visitor5").await;

    let no_user = app
        .request(
            Method::POST,
            &format!("/api/v1/users/9999/start-using/{}", facility_id),
            None,
        )
        .await;
    assert_eq!(no_user.status(), 404);

    let no_facility = app
        .request(
            Method::POST,
            &format!("/api/v1/users/{}/start-using/9999", user_id),
            None,
        )
        .await;
    assert_eq!(no_facility.status(), 404);
}
