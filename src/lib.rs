//! Restroom Finder API Library
//!
//! This crate provides the core functionality for the Restroom Finder API
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use axum::{extract::State, response::Json, routing::get, Router};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use utoipa::ToSchema;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

// Common response wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success with a human-readable message and no payload.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            errors: None,
        }
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// All v1 API routes, grouped per resource.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .nest("/facilities", handlers::facilities::routes())
        .nest("/users", handlers::users::routes())
        .nest("/auth", handlers::auth::routes())
        .nest("/reviews", handlers::reviews::routes())
        .nest("/chat", handlers::chat::routes())
        .nest("/payments", handlers::payments::routes())
        .nest("/owner", handlers::owners::routes())
}

/// Full application router: v1 API plus Swagger UI. Middleware layers are
/// applied by the binary so tests can exercise the bare router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "restroom-finder-api up" }))
        .nest("/api/v1", api_v1_routes())
        .merge(openapi::swagger_ui())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> ApiResult<Value> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let health_data = json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(health_data)))
}

#[cfg(test)]
mod response_tests {
    use super::*;

    #[test]
    fn success_response_carries_data() {
        let response = ApiResponse::success(42);
        assert!(response.success);
        assert_eq!(response.data, Some(42));
        assert!(response.message.is_none());
    }

    #[test]
    fn ok_response_carries_message_only() {
        let response = ApiResponse::ok("done");
        assert!(response.success);
        assert!(response.data.is_none());
        assert_eq!(response.message.as_deref(), Some("done"));
    }
}
