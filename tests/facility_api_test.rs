//! Facility listing, creation and partial-update behavior.

mod common;

use axum::http::Method;
use common::{response_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn owner_registration_seeds_facilities_with_spread_positions() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/owner/register",
            Some(json!({
                "owner": {
                    "name": "Lan Tran",
                    "email": "lan@example.vn",
                    "phone": "0901234567"
                },
                "restrooms": [
                    { "name": "Cafe Lan", "address": "1 Vo Van Ngan" },
                    { "name": "Lan Annex", "address": "2 Vo Van Ngan" }
                ]
            })),
        )
        .await;
    assert_eq!(response.status(), 201);

    let list = app.request(Method::GET, "/api/v1/facilities", None).await;
    assert_eq!(list.status(), 200);
    let body = response_json(list).await;
    let facilities = body["data"].as_array().expect("facility array");
    assert_eq!(facilities.len(), 2);

    // Seeded facilities start free, five-starred and fanned out on the map.
    let first = &facilities[0];
    let second = &facilities[1];
    assert_eq!(first["rating"].as_f64(), Some(5.0));
    assert_eq!(first["is_free"].as_bool(), Some(true));
    assert_eq!(first["latitude"].as_f64(), Some(10.88));
    let second_lat = second["latitude"].as_f64().expect("latitude");
    assert!((second_lat - 10.881).abs() < 1e-9);
    assert_eq!(first["admin_contact"].as_str(), Some("lan@example.vn"));
}

#[tokio::test]
async fn facility_creation_requires_known_owner_email() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;

    let missing = app
        .request(
            Method::POST,
            "/api/v1/owner/facilities",
            Some(json!({
                "name": "Orphan",
                "address": "Nowhere 1",
                "admin_contact": "unknown@example.vn"
            })),
        )
        .await;
    assert_eq!(missing.status(), 404);

    let no_contact = app
        .request(
            Method::POST,
            "/api/v1/owner/facilities",
            Some(json!({
                "name": "Orphan",
                "address": "Nowhere 1"
            })),
        )
        .await;
    assert_eq!(no_contact.status(), 400);
}

#[tokio::test]
async fn fixture_counts_round_trip_through_create_and_detail() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;

    let facility_id = app
        .seed_facility(
            "owner@example.vn",
            "Station West",
            json!({
                "maleToilets": { "standing": 3, "sitting": 2 },
                "femaleToilets": { "sitting": 4 },
                "disabledAccess": true,
                "is_free": false,
                "price": 5000,
                "images": ["https://img/a.jpg", "https://img/b.jpg"]
            }),
        )
        .await;

    let detail = app
        .request(
            Method::GET,
            &format!("/api/v1/facilities/{}", facility_id),
            None,
        )
        .await;
    assert_eq!(detail.status(), 200);
    let body = response_json(detail).await;
    let data = &body["data"];
    assert_eq!(data["male_standing"].as_i64(), Some(3));
    assert_eq!(data["male_sitting"].as_i64(), Some(2));
    assert_eq!(data["female_sitting"].as_i64(), Some(4));
    assert_eq!(data["disabled_access"].as_bool(), Some(true));
    assert_eq!(data["is_free"].as_bool(), Some(false));
    assert_eq!(data["price"].as_i64(), Some(5000));
    assert_eq!(data["images"].as_array().map(|a| a.len()), Some(2));
    assert_eq!(data["reviews"].as_array().map(|a| a.len()), Some(0));
}

#[tokio::test]
async fn partial_update_leaves_unspecified_fields_untouched() {
    let app = TestApp::new().await;
    app.seed_owner("owner@example.vn").await;
    let facility_id = app
        .seed_facility(
            "owner@example.vn",
            "Corner Shop",
            json!({
                "maleToilets": { "standing": 1, "sitting": 1 },
                "femaleToilets": { "sitting": 2 }
            }),
        )
        .await;

    // Only the male standing count and the price change.
    let update = app
        .request(
            Method::PUT,
            &format!("/api/v1/owner/facilities/{}", facility_id),
            Some(json!({
                "price": 2000,
                "is_free": false,
                "maleToilets": { "standing": 5 }
            })),
        )
        .await;
    assert_eq!(update.status(), 200);

    let detail = app
        .request(
            Method::GET,
            &format!("/api/v1/facilities/{}", facility_id),
            None,
        )
        .await;
    let body = response_json(detail).await;
    let data = &body["data"];
    assert_eq!(data["name"].as_str(), Some("Corner Shop"));
    assert_eq!(data["price"].as_i64(), Some(2000));
    assert_eq!(data["male_standing"].as_i64(), Some(5));
    assert_eq!(data["male_sitting"].as_i64(), Some(1));
    assert_eq!(data["female_sitting"].as_i64(), Some(2));
}

#[tokio::test]
async fn owner_facilities_are_addressable_by_id_or_email() {
    let app = TestApp::new().await;
    let owner_id = app.seed_owner("dual@example.vn").await;
    app.seed_facility("dual@example.vn", "Dual Key", json!({}))
        .await;

    let by_email = app
        .request(
            Method::GET,
            "/api/v1/owner/dual@example.vn/facilities",
            None,
        )
        .await;
    assert_eq!(by_email.status(), 200);
    let email_body = response_json(by_email).await;
    assert_eq!(email_body["data"].as_array().map(|a| a.len()), Some(1));

    let by_id = app
        .request(
            Method::GET,
            &format!("/api/v1/owner/{}/facilities", owner_id),
            None,
        )
        .await;
    assert_eq!(by_id.status(), 200);
    let id_body = response_json(by_id).await;
    assert_eq!(id_body["data"].as_array().map(|a| a.len()), Some(1));
}

#[tokio::test]
async fn missing_facility_returns_404() {
    let app = TestApp::new().await;
    let response = app
        .request(Method::GET, "/api/v1/facilities/9999", None)
        .await;
    assert_eq!(response.status(), 404);
}
