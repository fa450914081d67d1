use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::auth::{AccountResponse, Role};
use crate::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

fn default_role() -> Role {
    Role::User
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be between 1 and 50 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsernameCheckResponse {
    pub exists: bool,
}

/// Register a visitor or owner account
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = crate::ApiResponse<AccountResponse>),
        (status = 409, description = "Username taken", body = crate::errors::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), ServiceError> {
    request.validate()?;
    let account = state
        .services
        .auth
        .register(&request.username, &request.password, request.role)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(account))))
}

/// Log in as a visitor (credential check) or owner (email lookup)
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = crate::ApiResponse<AccountResponse>),
        (status = 401, description = "Invalid credentials", body = crate::errors::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ServiceError> {
    request.validate()?;
    let account = state
        .services
        .auth
        .login(&request.username, &request.password)
        .await?;
    Ok(Json(ApiResponse::success(account)))
}

/// Whether a visitor username is already taken
#[utoipa::path(
    get,
    path = "/api/v1/auth/check-username/:username",
    params(
        ("username" = String, Path, description = "Username to check")
    ),
    responses(
        (status = 200, description = "Availability", body = crate::ApiResponse<UsernameCheckResponse>)
    ),
    tag = "Auth"
)]
pub async fn check_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<UsernameCheckResponse>>, ServiceError> {
    let exists = state.services.auth.username_exists(&username).await?;
    Ok(Json(ApiResponse::success(UsernameCheckResponse { exists })))
}

/// Auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/check-username/:username", get(check_username))
}
