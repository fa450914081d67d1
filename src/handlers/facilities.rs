use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::facilities::{FacilityDetailResponse, FacilityResponse};
use crate::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body for visitor actions that only carry the acting visitor.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VisitorActionRequest {
    /// Acting visitor; omitted for anonymous guests
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotifyOwnerRequest {
    pub user_id: Option<i64>,
    /// Notification category stored with the message
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

/// List all facilities
#[utoipa::path(
    get,
    path = "/api/v1/facilities",
    responses(
        (status = 200, description = "All facilities", body = crate::ApiResponse<Vec<FacilityResponse>>)
    ),
    tag = "Facilities"
)]
pub async fn list_facilities(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<FacilityResponse>>>, ServiceError> {
    let facilities = state.services.facilities.list().await?;
    Ok(Json(ApiResponse::success(facilities)))
}

/// Facility detail with its most recent reviews
#[utoipa::path(
    get,
    path = "/api/v1/facilities/:facility_id",
    params(
        ("facility_id" = i64, Path, description = "Facility ID")
    ),
    responses(
        (status = 200, description = "Facility detail", body = crate::ApiResponse<FacilityDetailResponse>),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Facilities"
)]
pub async fn get_facility(
    State(state): State<AppState>,
    Path(facility_id): Path<i64>,
) -> Result<Json<ApiResponse<FacilityDetailResponse>>, ServiceError> {
    let detail = state.services.facilities.get_with_reviews(facility_id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

/// Tell the owner a visitor is on the way
#[utoipa::path(
    post,
    path = "/api/v1/facilities/:facility_id/navigation",
    request_body = VisitorActionRequest,
    responses(
        (status = 201, description = "Navigation request sent to owner"),
        (status = 400, description = "Facility has no owner", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Facilities"
)]
pub async fn request_navigation(
    State(state): State<AppState>,
    Path(facility_id): Path<i64>,
    Json(request): Json<VisitorActionRequest>,
) -> Result<(axum::http::StatusCode, Json<ApiResponse<()>>), ServiceError> {
    state
        .services
        .notifications
        .navigation_request(facility_id, request.user_id)
        .await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(ApiResponse::ok("Navigation request sent to owner")),
    ))
}

/// Tell the owner a visitor has arrived
#[utoipa::path(
    post,
    path = "/api/v1/facilities/:facility_id/arrival",
    request_body = VisitorActionRequest,
    responses(
        (status = 201, description = "Arrival notification sent to owner"),
        (status = 400, description = "Facility has no owner", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Facilities"
)]
pub async fn notify_arrival(
    State(state): State<AppState>,
    Path(facility_id): Path<i64>,
    Json(request): Json<VisitorActionRequest>,
) -> Result<(axum::http::StatusCode, Json<ApiResponse<()>>), ServiceError> {
    state
        .services
        .notifications
        .arrival(facility_id, request.user_id)
        .await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(ApiResponse::ok("Arrival notification sent to owner")),
    ))
}

/// Send the owner a free-form notification
#[utoipa::path(
    post,
    path = "/api/v1/facilities/:facility_id/notify-owner",
    request_body = NotifyOwnerRequest,
    responses(
        (status = 201, description = "Notification sent to owner"),
        (status = 400, description = "Facility has no owner", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Facilities"
)]
pub async fn notify_owner(
    State(state): State<AppState>,
    Path(facility_id): Path<i64>,
    Json(request): Json<NotifyOwnerRequest>,
) -> Result<(axum::http::StatusCode, Json<ApiResponse<()>>), ServiceError> {
    state
        .services
        .notifications
        .notify_owner(facility_id, request.user_id, request.kind, request.message)
        .await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(ApiResponse::ok("Notification sent to owner")),
    ))
}

/// Facility routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_facilities))
        .route("/:facility_id", get(get_facility))
        .route("/:facility_id/navigation", post(request_navigation))
        .route("/:facility_id/arrival", post(notify_arrival))
        .route("/:facility_id/notify-owner", post(notify_owner))
}
