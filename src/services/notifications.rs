use crate::{
    db::DbPool,
    entities::{facility, notification, owner, user},
    errors::ServiceError,
    services::facilities::OwnerKey,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// Label used when the acting visitor is anonymous or unknown.
pub const GUEST_LABEL: &str = "Guest";

const OWNER_FEED_LIMIT: u64 = 50;

/// Parameters for a single owner-directed notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub owner_id: i64,
    pub facility_id: i64,
    pub user_id: Option<i64>,
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FacilityRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponse {
    pub id: i64,
    pub kind: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub facility: Option<FacilityRef>,
}

/// Synchronous notification fan-out. Emissions happen in the same unit of
/// work as the triggering action; delivery is durable storage only, clients
/// poll.
#[derive(Clone)]
pub struct NotificationService {
    db: Arc<DbPool>,
}

impl NotificationService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Stores one unread notification on the given connection, which may be
    /// a transaction shared with the triggering write.
    pub async fn create_in<C: ConnectionTrait>(
        conn: &C,
        new: NewNotification,
    ) -> Result<notification::Model, ServiceError> {
        let model = notification::ActiveModel {
            owner_id: Set(new.owner_id),
            facility_id: Set(new.facility_id),
            user_id: Set(new.user_id),
            kind: Set(new.kind),
            message: Set(new.message),
            is_read: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(conn).await?)
    }

    /// Resolves the display name for a notification message, falling back to
    /// the generic guest label for anonymous or unspecified visitors.
    pub async fn display_name<C: ConnectionTrait>(
        conn: &C,
        user_id: Option<i64>,
    ) -> Result<String, ServiceError> {
        if let Some(id) = user_id {
            if let Some(visitor) = user::Entity::find_by_id(id).one(conn).await? {
                return Ok(visitor.username);
            }
        }
        Ok(GUEST_LABEL.to_string())
    }

    /// Fan-out for a visitor requesting directions to a facility.
    #[instrument(skip(self))]
    pub async fn navigation_request(
        &self,
        facility_id: i64,
        user_id: Option<i64>,
    ) -> Result<(), ServiceError> {
        let (site, owner_id, actor) = self.facility_target(facility_id, user_id).await?;
        Self::create_in(
            &*self.db,
            NewNotification {
                owner_id,
                facility_id: site.id,
                user_id,
                kind: "navigation_request".to_string(),
                message: format!("{} requested directions to {}", actor, site.name),
            },
        )
        .await?;
        Ok(())
    }

    /// Fan-out for a visitor arriving at a facility.
    #[instrument(skip(self))]
    pub async fn arrival(
        &self,
        facility_id: i64,
        user_id: Option<i64>,
    ) -> Result<(), ServiceError> {
        let (site, owner_id, actor) = self.facility_target(facility_id, user_id).await?;
        Self::create_in(
            &*self.db,
            NewNotification {
                owner_id,
                facility_id: site.id,
                user_id,
                kind: "arrival".to_string(),
                message: format!("{} arrived at {}", actor, site.name),
            },
        )
        .await?;
        Ok(())
    }

    /// Generic owner notification with a caller-supplied kind and text,
    /// prefixed with the acting visitor's name.
    #[instrument(skip(self, message))]
    pub async fn notify_owner(
        &self,
        facility_id: i64,
        user_id: Option<i64>,
        kind: String,
        message: String,
    ) -> Result<(), ServiceError> {
        let (site, owner_id, actor) = self.facility_target(facility_id, user_id).await?;
        Self::create_in(
            &*self.db,
            NewNotification {
                owner_id,
                facility_id: site.id,
                user_id,
                kind,
                message: format!("{}: {}", actor, message),
            },
        )
        .await?;
        Ok(())
    }

    /// Resolves the facility, its owner and the acting visitor's display
    /// name. Facilities without an owner cannot receive notifications.
    async fn facility_target(
        &self,
        facility_id: i64,
        user_id: Option<i64>,
    ) -> Result<(facility::Model, i64, String), ServiceError> {
        let db = &*self.db;
        let site = facility::Entity::find_by_id(facility_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Facility {} not found", facility_id))
            })?;
        let owner_id = site
            .owner_id
            .ok_or_else(|| ServiceError::BadRequest("Facility has no owner".to_string()))?;
        let actor = Self::display_name(db, user_id).await?;
        Ok((site, owner_id, actor))
    }

    /// The owner's notification feed, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_owner(
        &self,
        key: OwnerKey,
    ) -> Result<Vec<NotificationResponse>, ServiceError> {
        let db = &*self.db;
        let account = match key {
            OwnerKey::Id(id) => owner::Entity::find_by_id(id).one(db).await?,
            OwnerKey::Email(ref email) => {
                owner::Entity::find()
                    .filter(owner::Column::Email.eq(email.clone()))
                    .one(db)
                    .await?
            }
        }
        .ok_or_else(|| ServiceError::NotFound("Owner not found".to_string()))?;

        let rows = notification::Entity::find()
            .filter(notification::Column::OwnerId.eq(account.id))
            .order_by_desc(notification::Column::CreatedAt)
            .limit(OWNER_FEED_LIMIT)
            .find_also_related(facility::Entity)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(n, f)| NotificationResponse {
                id: n.id,
                kind: n.kind,
                message: n.message,
                is_read: n.is_read,
                created_at: n.created_at,
                facility: f.map(|f| FacilityRef {
                    id: f.id,
                    name: f.name,
                }),
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn mark_read(&self, notification_id: i64) -> Result<(), ServiceError> {
        let db = &*self.db;
        let row = notification::Entity::find_by_id(notification_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Notification {} not found", notification_id))
            })?;

        let mut active: notification::ActiveModel = row.into();
        active.is_read = Set(true);
        active.update(db).await?;
        Ok(())
    }
}
