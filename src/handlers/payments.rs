use crate::entities::payment::PaymentMethod;
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::payments::{ConfirmAction, PaymentResponse, SubmitPaymentRequest};
use crate::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitPaymentBody {
    pub user_id: i64,
    pub facility_id: i64,
    pub method: PaymentMethod,
    /// Amount in whole currency units
    pub amount: i64,
    pub transfer_image_path: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfirmPaymentBody {
    /// "confirm" or "reject"
    pub action: String,
}

/// Submit a payment claim; cash auto-confirms, transfer pends until the
/// owner decides
#[utoipa::path(
    post,
    path = "/api/v1/payments",
    request_body = SubmitPaymentBody,
    responses(
        (status = 201, description = "Payment recorded", body = crate::ApiResponse<PaymentResponse>),
        (status = 404, description = "Facility or owner not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Payments"
)]
pub async fn submit_payment(
    State(state): State<AppState>,
    Json(body): Json<SubmitPaymentBody>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentResponse>>), ServiceError> {
    let recorded = state
        .services
        .payments
        .submit(SubmitPaymentRequest {
            user_id: body.user_id,
            facility_id: body.facility_id,
            method: body.method,
            amount: body.amount,
            transfer_image_path: body.transfer_image_path,
            note: body.note,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(recorded)),
    ))
}

/// Apply the owner's confirm/reject decision to a payment
#[utoipa::path(
    post,
    path = "/api/v1/payments/:payment_id/confirm",
    params(
        ("payment_id" = i64, Path, description = "Payment ID")
    ),
    request_body = ConfirmPaymentBody,
    responses(
        (status = 200, description = "Decision applied", body = crate::ApiResponse<PaymentResponse>),
        (status = 400, description = "Unknown action", body = crate::errors::ErrorResponse),
        (status = 404, description = "Payment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Payments"
)]
pub async fn confirm_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<i64>,
    Json(body): Json<ConfirmPaymentBody>,
) -> Result<Json<ApiResponse<PaymentResponse>>, ServiceError> {
    let action = match body.action.as_str() {
        "confirm" => ConfirmAction::Confirm,
        "reject" => ConfirmAction::Reject,
        other => {
            return Err(ServiceError::ValidationError(format!(
                "Unknown action: {}",
                other
            )))
        }
    };
    let updated = state.services.payments.confirm(payment_id, action).await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// Payment routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_payment))
        .route("/:payment_id/confirm", post(confirm_payment))
}
