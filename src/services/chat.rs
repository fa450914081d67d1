use crate::{
    db::DbPool,
    entities::chat_message::{self, MessageKind},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct SendMessageRequest {
    pub facility_id: i64,
    pub user_id: i64,
    pub message: String,
    pub kind: MessageKind,
    pub is_from_owner: bool,
}

/// Append-only chat per facility, ordered by creation time.
#[derive(Clone)]
pub struct ChatService {
    db: Arc<DbPool>,
}

impl ChatService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(facility_id = request.facility_id))]
    pub async fn send(&self, request: SendMessageRequest) -> Result<chat_message::Model, ServiceError> {
        if request.message.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Message text is required".to_string(),
            ));
        }

        let model = chat_message::ActiveModel {
            facility_id: Set(request.facility_id),
            user_id: Set(request.user_id),
            message: Set(request.message),
            kind: Set(request.kind),
            is_from_owner: Set(request.is_from_owner),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_for_facility(
        &self,
        facility_id: i64,
    ) -> Result<Vec<chat_message::Model>, ServiceError> {
        Ok(chat_message::Entity::find()
            .filter(chat_message::Column::FacilityId.eq(facility_id))
            .order_by_asc(chat_message::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }
}
