use crate::entities::chat_message::{self, MessageKind};
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::chat::SendMessageRequest;
use crate::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_kind() -> MessageKind {
    MessageKind::Normal
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostMessageRequest {
    pub facility_id: i64,
    pub user_id: i64,
    pub message: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: MessageKind,
    #[serde(default)]
    pub is_from_owner: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatMessageResponse {
    pub id: i64,
    pub facility_id: i64,
    pub user_id: i64,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub is_from_owner: bool,
    pub created_at: DateTime<Utc>,
}

impl From<chat_message::Model> for ChatMessageResponse {
    fn from(model: chat_message::Model) -> Self {
        Self {
            id: model.id,
            facility_id: model.facility_id,
            user_id: model.user_id,
            message: model.message,
            kind: model.kind,
            is_from_owner: model.is_from_owner,
            created_at: model.created_at,
        }
    }
}

/// Post a chat message to a facility's thread
#[utoipa::path(
    post,
    path = "/api/v1/chat/messages",
    request_body = PostMessageRequest,
    responses(
        (status = 201, description = "Message stored", body = crate::ApiResponse<ChatMessageResponse>),
        (status = 400, description = "Empty message", body = crate::errors::ErrorResponse)
    ),
    tag = "Chat"
)]
pub async fn post_message(
    State(state): State<AppState>,
    Json(request): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ChatMessageResponse>>), ServiceError> {
    let stored = state
        .services
        .chat
        .send(SendMessageRequest {
            facility_id: request.facility_id,
            user_id: request.user_id,
            message: request.message,
            kind: request.kind,
            is_from_owner: request.is_from_owner,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(stored.into())),
    ))
}

/// A facility's chat thread, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/chat/messages/:facility_id",
    params(
        ("facility_id" = i64, Path, description = "Facility ID")
    ),
    responses(
        (status = 200, description = "Chat thread", body = crate::ApiResponse<Vec<ChatMessageResponse>>)
    ),
    tag = "Chat"
)]
pub async fn list_messages(
    State(state): State<AppState>,
    Path(facility_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<ChatMessageResponse>>>, ServiceError> {
    let messages = state.services.chat.list_for_facility(facility_id).await?;
    Ok(Json(ApiResponse::success(
        messages.into_iter().map(ChatMessageResponse::from).collect(),
    )))
}

/// Chat routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/messages", post(post_message))
        .route("/messages/:facility_id", get(list_messages))
}
