use crate::entities::review;
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::reviews::CreateReviewRequest;
use crate::ApiResponse;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitReviewRequest {
    pub facility_id: i64,
    pub user_id: i64,
    /// Star rating, 1 through 5
    pub rating: i32,
    pub comment: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewCreatedResponse {
    pub id: i64,
    pub facility_id: i64,
    pub user_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<review::Model> for ReviewCreatedResponse {
    fn from(model: review::Model) -> Self {
        Self {
            id: model.id,
            facility_id: model.facility_id,
            user_id: model.user_id,
            rating: model.rating,
            comment: model.comment,
            image_path: model.image_path,
            created_at: model.created_at,
        }
    }
}

/// Submit a review; the facility's rating aggregate is updated in the same
/// transaction
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    request_body = SubmitReviewRequest,
    responses(
        (status = 201, description = "Review created", body = crate::ApiResponse<ReviewCreatedResponse>),
        (status = 400, description = "Rating out of range", body = crate::errors::ErrorResponse),
        (status = 404, description = "Facility not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Reviews"
)]
pub async fn submit_review(
    State(state): State<AppState>,
    Json(request): Json<SubmitReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewCreatedResponse>>), ServiceError> {
    let created = state
        .services
        .reviews
        .create(CreateReviewRequest {
            facility_id: request.facility_id,
            user_id: request.user_id,
            rating: request.rating,
            comment: request.comment,
            image_path: request.image_path,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(created.into())),
    ))
}

/// Review routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(submit_review))
}
