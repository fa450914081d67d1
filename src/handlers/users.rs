use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::payments::{PaymentStatusResponse, UserPaymentResponse};
use crate::services::users::UserHistoryResponse;
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

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGuestRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be between 1 and 50 characters"))]
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub is_guest: bool,
}

/// Create an anonymous guest account
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateGuestRequest,
    responses(
        (status = 201, description = "Guest created", body = crate::ApiResponse<UserResponse>),
        (status = 409, description = "Username taken", body = crate::errors::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn create_guest(
    State(state): State<AppState>,
    Json(request): Json<CreateGuestRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ServiceError> {
    request.validate()?;
    let created = state.services.users.create_guest(&request.username).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserResponse {
            id: created.id,
            username: created.username,
            is_guest: created.is_guest,
        })),
    ))
}

/// Usage sessions and reviews for one visitor
#[utoipa::path(
    get,
    path = "/api/v1/users/:user_id/history",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Activity history", body = crate::ApiResponse<UserHistoryResponse>)
    ),
    tag = "Users"
)]
pub async fn get_history(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<UserHistoryResponse>>, ServiceError> {
    let history = state.services.users.history(user_id).await?;
    Ok(Json(ApiResponse::success(history)))
}

/// Open a usage session at a facility
#[utoipa::path(
    post,
    path = "/api/v1/users/:user_id/start-using/:facility_id",
    params(
        ("user_id" = i64, Path, description = "User ID"),
        ("facility_id" = i64, Path, description = "Facility ID")
    ),
    responses(
        (status = 200, description = "Session started"),
        (status = 402, description = "Confirmed payment required", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn start_using(
    State(state): State<AppState>,
    Path((user_id, facility_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<()>>, ServiceError> {
    state.services.usage.start_using(user_id, facility_id).await?;
    Ok(Json(ApiResponse::ok("Started using facility")))
}

/// Close the visitor's current usage session
#[utoipa::path(
    post,
    path = "/api/v1/users/:user_id/stop-using",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Session stopped"),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn stop_using(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ServiceError> {
    state.services.usage.stop_using(user_id).await?;
    Ok(Json(ApiResponse::ok("Stopped using facility")))
}

/// Payments the visitor has submitted, newest first
#[utoipa::path(
    get,
    path = "/api/v1/users/:user_id/payments",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Payment list", body = crate::ApiResponse<Vec<UserPaymentResponse>>)
    ),
    tag = "Users"
)]
pub async fn list_payments(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<UserPaymentResponse>>>, ServiceError> {
    let payments = state.services.payments.list_for_user(user_id).await?;
    Ok(Json(ApiResponse::success(payments)))
}

/// Whether the visitor holds a confirmed payment for the facility
#[utoipa::path(
    get,
    path = "/api/v1/users/:user_id/payment-status/:facility_id",
    params(
        ("user_id" = i64, Path, description = "User ID"),
        ("facility_id" = i64, Path, description = "Facility ID")
    ),
    responses(
        (status = 200, description = "Payment status", body = crate::ApiResponse<PaymentStatusResponse>)
    ),
    tag = "Users"
)]
pub async fn payment_status(
    State(state): State<AppState>,
    Path((user_id, facility_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<PaymentStatusResponse>>, ServiceError> {
    let status = state.services.payments.status_for(user_id, facility_id).await?;
    Ok(Json(ApiResponse::success(status)))
}

/// Visitor routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_guest))
        .route("/:user_id/history", get(get_history))
        .route("/:user_id/start-using/:facility_id", post(start_using))
        .route("/:user_id/stop-using", post(stop_using))
        .route("/:user_id/payments", get(list_payments))
        .route("/:user_id/payment-status/:facility_id", get(payment_status))
}
