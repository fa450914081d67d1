use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Restroom Finder API",
        version = "1.0.0",
        description = r#"
# Restroom Finder API

Backend for a location-based restroom finder: facility listings with live
occupancy, usage sessions, payment confirmation for priced facilities,
reviews, per-facility chat and an owner dashboard.

## Error Handling

Errors use a consistent JSON shape with appropriate HTTP status codes:

```json
{
  "error": "Not Found",
  "message": "Facility 42 not found",
  "timestamp": "2026-01-01T00:00:00Z"
}
```

A `402 Payment Required` is returned when a visitor tries to start using a
priced facility without a confirmed payment.
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Facilities", description = "Facility listings and visitor-to-owner signals"),
        (name = "Users", description = "Visitor accounts, usage sessions and history"),
        (name = "Auth", description = "Registration and login"),
        (name = "Reviews", description = "Facility reviews"),
        (name = "Chat", description = "Per-facility chat threads"),
        (name = "Payments", description = "Payment claims and owner decisions"),
        (name = "Owner", description = "Owner dashboard endpoints")
    ),
    paths(
        // Facilities
        crate::handlers::facilities::list_facilities,
        crate::handlers::facilities::get_facility,
        crate::handlers::facilities::request_navigation,
        crate::handlers::facilities::notify_arrival,
        crate::handlers::facilities::notify_owner,

        // Users
        crate::handlers::users::create_guest,
        crate::handlers::users::get_history,
        crate::handlers::users::start_using,
        crate::handlers::users::stop_using,
        crate::handlers::users::list_payments,
        crate::handlers::users::payment_status,

        // Auth
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::auth::check_username,

        // Reviews
        crate::handlers::reviews::submit_review,

        // Chat
        crate::handlers::chat::post_message,
        crate::handlers::chat::list_messages,

        // Payments
        crate::handlers::payments::submit_payment,
        crate::handlers::payments::confirm_payment,

        // Owner
        crate::handlers::owners::register_owner,
        crate::handlers::owners::list_owner_facilities,
        crate::handlers::owners::create_facility,
        crate::handlers::owners::update_facility,
        crate::handlers::owners::list_notifications,
        crate::handlers::owners::mark_notification_read,
        crate::handlers::owners::list_owner_payments,
    ),
    components(
        schemas(
            // Common types
            crate::ApiResponse<serde_json::Value>,

            // Facility types
            crate::services::facilities::FacilityResponse,
            crate::services::facilities::FacilityDetailResponse,
            crate::services::facilities::ReviewResponse,
            crate::services::facilities::CreateFacilityRequest,
            crate::services::facilities::UpdateFacilityRequest,
            crate::services::facilities::MaleFixtures,
            crate::services::facilities::FemaleFixtures,
            crate::handlers::facilities::VisitorActionRequest,
            crate::handlers::facilities::NotifyOwnerRequest,

            // User types
            crate::handlers::users::CreateGuestRequest,
            crate::handlers::users::UserResponse,
            crate::services::users::UserHistoryResponse,
            crate::services::users::UsageHistoryEntry,
            crate::services::users::ReviewHistoryEntry,

            // Auth types
            crate::handlers::auth::RegisterRequest,
            crate::handlers::auth::LoginRequest,
            crate::handlers::auth::UsernameCheckResponse,
            crate::services::auth::AccountResponse,
            crate::services::auth::Role,

            // Review types
            crate::handlers::reviews::SubmitReviewRequest,
            crate::handlers::reviews::ReviewCreatedResponse,

            // Chat types
            crate::handlers::chat::PostMessageRequest,
            crate::handlers::chat::ChatMessageResponse,
            crate::entities::chat_message::MessageKind,

            // Payment types
            crate::handlers::payments::SubmitPaymentBody,
            crate::handlers::payments::ConfirmPaymentBody,
            crate::services::payments::PaymentResponse,
            crate::services::payments::PaymentStatusResponse,
            crate::services::payments::OwnerPaymentResponse,
            crate::services::payments::UserPaymentResponse,
            crate::entities::payment::PaymentMethod,
            crate::entities::payment::PaymentStatus,

            // Owner types
            crate::services::owners::RegisterOwnerRequest,
            crate::services::owners::OwnerProfile,
            crate::services::owners::OwnerFacilitySeed,
            crate::handlers::owners::OwnerRegisteredResponse,
            crate::handlers::owners::FacilityCreatedResponse,
            crate::services::notifications::NotificationResponse,
            crate::services::notifications::FacilityRef,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_generates() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string(&openapi).expect("document serializes");
        assert!(json.contains("Restroom Finder API"));
        assert!(json.contains("/api/v1/facilities"));
        assert!(json.contains("/api/v1/payments"));
    }
}
