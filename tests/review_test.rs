//! Reviews, rating aggregates and owner notification fan-out.

mod common;

use axum::http::Method;
use common::{response_json, TestApp};
use serde_json::json;

async fn submit_review(app: &TestApp, facility_id: i64, user_id: i64, rating: i64) -> u16 {
    let response = app
        .request(
            Method::POST,
            "/api/v1/reviews",
            Some(json!({
                "facility_id": facility_id,
                "user_id": user_id,
                "rating": rating,
                "comment": "tidy"
            })),
        )
        .await;
    response.status().as_u16()
}

#[tokio::test]
async fn rating_is_the_mean_over_all_reviews() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility("owner@example.vn", "Review Stop", json!({}))
        .await;
    let alice = app.seed_guest("alice").await;
    let bob = app.seed_guest("bob").await;

    assert_eq!(submit_review(&app, facility_id, alice, 4).await, 201);
    assert_eq!(submit_review(&app, facility_id, bob, 2).await, 201);

    let detail = app
        .request(
            Method::GET,
            &format!("/api/v1/facilities/{}", facility_id),
            None,
        )
        .await;
    let body = response_json(detail).await;
    assert_eq!(body["data"]["rating"].as_f64(), Some(3.0));
    assert_eq!(body["data"]["total_reviews"].as_i64(), Some(2));
    assert_eq!(body["data"]["reviews"].as_array().map(|a| a.len()), Some(2));
}

#[tokio::test]
async fn review_notifies_the_owner_with_the_author_name() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility("owner@example.vn", "Notify Stop", json!({}))
        .await;
    let carol = app.seed_guest("carol").await;

    assert_eq!(submit_review(&app, facility_id, carol, 5).await, 201);

    let notifications = app.owner_notifications("owner@example.vn").await;
    assert!(notifications.iter().any(|n| {
        n["kind"].as_str() == Some("review")
            && n["message"].as_str() == Some("carol rated Notify Stop 5 stars")
    }));
}

#[tokio::test]
async fn unknown_author_falls_back_to_the_guest_label() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility("owner@example.vn", "Guest Stop", json!({}))
        .await;

    // The author id does not resolve to any account.
    assert_eq!(submit_review(&app, facility_id, 9999, 3).await, 201);

    let notifications = app.owner_notifications("owner@example.vn").await;
    assert!(notifications.iter().any(|n| {
        n["kind"].as_str() == Some("review")
            && n["message"].as_str() == Some("Guest rated Guest Stop 3 stars")
    }));
}

#[tokio::test]
async fn out_of_range_ratings_are_rejected() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility("owner@example.vn", "Range Stop", json!({}))
        .await;
    let dave = app.seed_guest("dave").await;

    assert_eq!(submit_review(&app, facility_id, dave, 0).await, 400);
    assert_eq!(submit_review(&app, facility_id, dave, 6).await, 400);
}

#[tokio::test]
async fn navigation_and_arrival_reach_the_owner_feed() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility("owner@example.vn", "Signal Stop", json!({}))
        .await;
    let erin = app.seed_guest("erin").await;

    let nav = app
        .request(
            Method::POST,
            &format!("/api/v1/facilities/{}/navigation", facility_id),
            Some(json!({ "user_id": erin })),
        )
        .await;
    assert_eq!(nav.status(), 201);

    // Anonymous arrival falls back to the guest label.
    let arrival = app
        .request(
            Method::POST,
            &format!("/api/v1/facilities/{}/arrival", facility_id),
            Some(json!({ "user_id": null })),
        )
        .await;
    assert_eq!(arrival.status(), 201);

    let custom = app
        .request(
            Method::POST,
            &format!("/api/v1/facilities/{}/notify-owner", facility_id),
            Some(json!({ "user_id": erin, "type": "supplies", "message": "out of paper" })),
        )
        .await;
    assert_eq!(custom.status(), 201);

    let notifications = app.owner_notifications("owner@example.vn").await;
    let messages: Vec<&str> = notifications
        .iter()
        .filter_map(|n| n["message"].as_str())
        .collect();
    assert!(messages.contains(&"erin requested directions to Signal Stop"));
    assert!(messages.contains(&"Guest arrived at Signal Stop"));
    assert!(messages.contains(&"erin: out of paper"));
}

#[tokio::test]
async fn notifications_can_be_marked_read() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility("owner@example.vn", "Read Stop", json!({}))
        .await;

    app.request(
        Method::POST,
        &format!("/api/v1/facilities/{}/arrival", facility_id),
        Some(json!({ "user_id": null })),
    )
    .await;

    let notifications = app.owner_notifications("owner@example.vn").await;
    let entry = notifications.first().expect("one notification");
    assert_eq!(entry["is_read"].as_bool(), Some(false));
    let id = entry["id"].as_i64().expect("notification id");

    let mark = app
        .request(
            Method::PUT,
            &format!("/api/v1/owner/notifications/{}/read", id),
            None,
        )
        .await;
    assert_eq!(mark.status(), 200);

    let refreshed = app.owner_notifications("owner@example.vn").await;
    assert_eq!(refreshed[0]["is_read"].as_bool(), Some(true));
}
