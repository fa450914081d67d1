//! Per-facility chat threads.

mod common;

use axum::http::Method;
use common::{response_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn messages_append_in_order_with_kind_tags() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility("owner@example.vn", "Chat Stop", json!({}))
        .await;
    let ivy = app.seed_guest("ivy").await;

    let first = app
        .request(
            Method::POST,
            "/api/v1/chat/messages",
            Some(json!({
                "facility_id": facility_id,
                "user_id": ivy,
                "message": "is it open?"
            })),
        )
        .await;
    assert_eq!(first.status(), 201);
    let first_body = response_json(first).await;
    assert_eq!(first_body["data"]["type"].as_str(), Some("normal"));

    let second = app
        .request(
            Method::POST,
            "/api/v1/chat/messages",
            Some(json!({
                "facility_id": facility_id,
                "user_id": ivy,
                "message": "no paper left!",
                "type": "supplies"
            })),
        )
        .await;
    assert_eq!(second.status(), 201);

    let thread = app
        .request(
            Method::GET,
            &format!("/api/v1/chat/messages/{}", facility_id),
            None,
        )
        .await;
    assert_eq!(thread.status(), 200);
    let body = response_json(thread).await;
    let messages = body["data"].as_array().expect("messages");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["message"].as_str(), Some("is it open?"));
    assert_eq!(messages[1]["type"].as_str(), Some("supplies"));
    assert_eq!(messages[1]["is_from_owner"].as_bool(), Some(false));
}

#[tokio::test]
async fn blank_messages_are_rejected() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility("owner@example.vn", "Quiet Stop", json!({}))
        .await;
    let jo = app.seed_guest("jo").await;

    let blank = app
        .request(
            Method::POST,
            "/api/v1/chat/messages",
            Some(json!({
                "facility_id": facility_id,
                "user_id": jo,
                "message": "   "
            })),
        )
        .await;
    assert_eq!(blank.status(), 400);

    let empty_thread = app
        .request(
            Method::GET,
            &format!("/api/v1/chat/messages/{}", facility_id),
            None,
        )
        .await;
    let body = response_json(empty_thread).await;
    assert_eq!(body["data"].as_array().map(|a| a.len()), Some(0));
}
