use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::facilities::{
    CreateFacilityRequest, FacilityResponse, OwnerKey, UpdateFacilityRequest,
};
use crate::services::notifications::NotificationResponse;
use crate::services::owners::RegisterOwnerRequest;
use crate::services::payments::OwnerPaymentResponse;
use crate::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OwnerRegisteredResponse {
    pub owner_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FacilityCreatedResponse {
    pub facility_id: i64,
}

/// Register an owner with their initial facilities, all-or-nothing
#[utoipa::path(
    post,
    path = "/api/v1/owner/register",
    request_body = RegisterOwnerRequest,
    responses(
        (status = 201, description = "Owner registered", body = crate::ApiResponse<OwnerRegisteredResponse>),
        (status = 400, description = "Validation failed", body = crate::errors::ErrorResponse)
    ),
    tag = "Owner"
)]
pub async fn register_owner(
    State(state): State<AppState>,
    Json(request): Json<RegisterOwnerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OwnerRegisteredResponse>>), ServiceError> {
    let owner_id = state.services.owners.register_with_facilities(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(OwnerRegisteredResponse { owner_id })),
    ))
}

/// Facilities belonging to an owner, addressed by id or email
#[utoipa::path(
    get,
    path = "/api/v1/owner/:key/facilities",
    params(
        ("key" = String, Path, description = "Owner ID or email")
    ),
    responses(
        (status = 200, description = "Owner's facilities", body = crate::ApiResponse<Vec<FacilityResponse>>),
        (status = 404, description = "Owner not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Owner"
)]
pub async fn list_owner_facilities(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<Vec<FacilityResponse>>>, ServiceError> {
    let facilities = state
        .services
        .facilities
        .list_for_owner(OwnerKey::from(key.as_str()))
        .await?;
    Ok(Json(ApiResponse::success(facilities)))
}

/// Create a facility for the owner named by `admin_contact`
#[utoipa::path(
    post,
    path = "/api/v1/owner/facilities",
    request_body = CreateFacilityRequest,
    responses(
        (status = 201, description = "Facility created", body = crate::ApiResponse<FacilityCreatedResponse>),
        (status = 400, description = "Validation failed", body = crate::errors::ErrorResponse),
        (status = 404, description = "Owner not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Owner"
)]
pub async fn create_facility(
    State(state): State<AppState>,
    Json(request): Json<CreateFacilityRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FacilityCreatedResponse>>), ServiceError> {
    let facility_id = state.services.facilities.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(FacilityCreatedResponse { facility_id })),
    ))
}

/// Partially update a facility
#[utoipa::path(
    put,
    path = "/api/v1/owner/facilities/:facility_id",
    params(
        ("facility_id" = i64, Path, description = "Facility ID")
    ),
    request_body = UpdateFacilityRequest,
    responses(
        (status = 200, description = "Facility updated"),
        (status = 404, description = "Facility not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Owner"
)]
pub async fn update_facility(
    State(state): State<AppState>,
    Path(facility_id): Path<i64>,
    Json(request): Json<UpdateFacilityRequest>,
) -> Result<Json<ApiResponse<()>>, ServiceError> {
    state.services.facilities.update(facility_id, request).await?;
    Ok(Json(ApiResponse::ok("Facility updated")))
}

/// The owner's notification feed, newest first
#[utoipa::path(
    get,
    path = "/api/v1/owner/:key/notifications",
    params(
        ("key" = String, Path, description = "Owner ID or email")
    ),
    responses(
        (status = 200, description = "Notification feed", body = crate::ApiResponse<Vec<NotificationResponse>>),
        (status = 404, description = "Owner not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Owner"
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<Vec<NotificationResponse>>>, ServiceError> {
    let feed = state
        .services
        .notifications
        .list_for_owner(OwnerKey::from(key.as_str()))
        .await?;
    Ok(Json(ApiResponse::success(feed)))
}

/// Mark one notification as read
#[utoipa::path(
    put,
    path = "/api/v1/owner/notifications/:notification_id/read",
    params(
        ("notification_id" = i64, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Marked read"),
        (status = 404, description = "Notification not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Owner"
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(notification_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ServiceError> {
    state.services.notifications.mark_read(notification_id).await?;
    Ok(Json(ApiResponse::ok("Notification marked as read")))
}

/// Payments addressed to an owner, newest first
#[utoipa::path(
    get,
    path = "/api/v1/owner/:key/payments",
    params(
        ("key" = String, Path, description = "Owner ID or email")
    ),
    responses(
        (status = 200, description = "Payment list", body = crate::ApiResponse<Vec<OwnerPaymentResponse>>),
        (status = 404, description = "Owner not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Owner"
)]
pub async fn list_owner_payments(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<Vec<OwnerPaymentResponse>>>, ServiceError> {
    let payments = state
        .services
        .payments
        .list_for_owner(OwnerKey::from(key.as_str()))
        .await?;
    Ok(Json(ApiResponse::success(payments)))
}

/// Owner dashboard routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_owner))
        .route("/facilities", post(create_facility))
        .route("/facilities/:facility_id", put(update_facility))
        .route("/notifications/:notification_id/read", put(mark_notification_read))
        .route("/:key/facilities", get(list_owner_facilities))
        .route("/:key/notifications", get(list_notifications))
        .route("/:key/payments", get(list_owner_payments))
}
