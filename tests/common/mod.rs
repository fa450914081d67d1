// Not every test binary touches every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use restroom_finder_api::{
    app_router,
    config::AppConfig,
    db::{self, DbConfig},
    handlers::AppServices,
    AppState,
};

/// Helper harness backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let cfg = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            host: "127.0.0.1".to_string(),
            port: 18_080,
            environment: "test".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            auto_migrate: true,
            cors_allowed_origins: None,
            db_max_connections: 1,
            db_min_connections: 1,
            request_timeout_secs: 30,
        };

        // A single pooled connection keeps every query on the same
        // in-memory database.
        let pool = db::establish_connection_with_config(&DbConfig {
            url: cfg.database_url.clone(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        })
        .await
        .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let services = AppServices::new(db_arc.clone());
        let state = AppState {
            db: db_arc,
            config: cfg,
            services,
        };

        let router = app_router(state.clone());
        Self { router, state }
    }

    /// Send a JSON request against the router.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Register an owner with no initial facilities; returns the owner id.
    pub async fn seed_owner(&self, email: &str) -> i64 {
        let response = self
            .request(
                Method::POST,
                "/api/v1/owner/register",
                Some(json!({
                    "owner": {
                        "name": "Test Owner",
                        "email": email,
                        "phone": "0900000000"
                    },
                    "restrooms": []
                })),
            )
            .await;
        assert_eq!(response.status(), 201, "owner registration should succeed");
        let body = response_json(response).await;
        body["data"]["owner_id"].as_i64().expect("owner id")
    }

    /// Create a facility for an already-registered owner; returns its id.
    pub async fn seed_facility(&self, owner_email: &str, name: &str, overrides: Value) -> i64 {
        let mut payload = json!({
            "name": name,
            "address": "12 Test Street",
            "admin_contact": owner_email,
        });
        if let (Some(base), Some(extra)) = (payload.as_object_mut(), overrides.as_object()) {
            for (key, value) in extra {
                base.insert(key.clone(), value.clone());
            }
        }

        let response = self
            .request(Method::POST, "/api/v1/owner/facilities", Some(payload))
            .await;
        assert_eq!(response.status(), 201, "facility creation should succeed");
        let body = response_json(response).await;
        body["data"]["facility_id"].as_i64().expect("facility id")
    }

    /// Create a guest visitor; returns the user id.
    pub async fn seed_guest(&self, username: &str) -> i64 {
        let response = self
            .request(
                Method::POST,
                "/api/v1/users",
                Some(json!({ "username": username })),
            )
            .await;
        assert_eq!(response.status(), 201, "guest creation should succeed");
        let body = response_json(response).await;
        body["data"]["id"].as_i64().expect("user id")
    }

    /// Current occupancy counter for a facility, read through the API.
    pub async fn current_users(&self, facility_id: i64) -> i64 {
        let response = self
            .request(
                Method::GET,
                &format!("/api/v1/facilities/{}", facility_id),
                None,
            )
            .await;
        assert_eq!(response.status(), 200);
        let body = response_json(response).await;
        body["data"]["current_users"].as_i64().expect("counter")
    }

    /// The owner's notification feed as raw JSON entries.
    pub async fn owner_notifications(&self, owner_email: &str) -> Vec<Value> {
        let response = self
            .request(
                Method::GET,
                &format!("/api/v1/owner/{}/notifications", owner_email),
                None,
            )
            .await;
        assert_eq!(response.status(), 200);
        let body = response_json(response).await;
        body["data"].as_array().cloned().unwrap_or_default()
    }
}

/// Parse a response body as JSON.
pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
