use crate::{
    db::DbPool,
    entities::{facility, review, usage_history, user},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

/// One closed or open usage session in the visitor's history.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsageHistoryEntry {
    pub id: i64,
    pub facility_name: String,
    pub facility_address: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewHistoryEntry {
    pub id: i64,
    pub facility_name: String,
    pub facility_address: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Combined activity feed: usage sessions and submitted reviews.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserHistoryResponse {
    pub usage_history: Vec<UsageHistoryEntry>,
    pub reviews: Vec<ReviewHistoryEntry>,
}

/// Visitor accounts and their activity history.
#[derive(Clone)]
pub struct UserService {
    db: Arc<DbPool>,
}

impl UserService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Creates an anonymous visitor with no credential.
    #[instrument(skip(self))]
    pub async fn create_guest(&self, username: &str) -> Result<user::Model, ServiceError> {
        let db = &*self.db;
        if username.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Username is required".to_string(),
            ));
        }

        let existing = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict("Username already exists".to_string()));
        }

        let created = user::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(None),
            is_guest: Set(true),
            current_facility_id: Set(None),
            active_since: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(user_id = created.id, "guest visitor created");
        Ok(created)
    }

    /// Usage sessions and reviews for one visitor, each newest first, with
    /// facility names and addresses resolved.
    #[instrument(skip(self))]
    pub async fn history(&self, user_id: i64) -> Result<UserHistoryResponse, ServiceError> {
        let db = &*self.db;

        let sessions = usage_history::Entity::find()
            .filter(usage_history::Column::UserId.eq(user_id))
            .order_by_desc(usage_history::Column::CreatedAt)
            .all(db)
            .await?;
        let reviews = review::Entity::find()
            .filter(review::Column::UserId.eq(user_id))
            .order_by_desc(review::Column::CreatedAt)
            .all(db)
            .await?;

        let facility_ids: Vec<i64> = sessions
            .iter()
            .map(|s| s.facility_id)
            .chain(reviews.iter().map(|r| r.facility_id))
            .collect();
        let facilities: HashMap<i64, (String, String)> = facility::Entity::find()
            .filter(facility::Column::Id.is_in(facility_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|f| (f.id, (f.name, f.address)))
            .collect();

        let lookup = |id: i64| {
            facilities
                .get(&id)
                .cloned()
                .unwrap_or_else(|| (String::new(), String::new()))
        };

        Ok(UserHistoryResponse {
            usage_history: sessions
                .into_iter()
                .map(|s| {
                    let (facility_name, facility_address) = lookup(s.facility_id);
                    UsageHistoryEntry {
                        id: s.id,
                        facility_name,
                        facility_address,
                        start_time: s.start_time,
                        end_time: s.end_time,
                        duration_minutes: s.duration_minutes,
                        created_at: s.created_at,
                    }
                })
                .collect(),
            reviews: reviews
                .into_iter()
                .map(|r| {
                    let (facility_name, facility_address) = lookup(r.facility_id);
                    ReviewHistoryEntry {
                        id: r.id,
                        facility_name,
                        facility_address,
                        rating: r.rating,
                        comment: r.comment,
                        image_path: r.image_path,
                        created_at: r.created_at,
                    }
                })
                .collect(),
        })
    }
}
