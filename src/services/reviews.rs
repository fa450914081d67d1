use crate::{
    db::DbPool,
    entities::{facility, review},
    errors::ServiceError,
    services::notifications::{NewNotification, NotificationService},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

#[derive(Debug, Clone, Validate)]
pub struct CreateReviewRequest {
    pub facility_id: i64,
    pub user_id: i64,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    pub comment: Option<String>,
    pub image_path: Option<String>,
}

/// Review submission plus facility aggregate upkeep and owner fan-out, all
/// in one transaction.
#[derive(Clone)]
pub struct ReviewService {
    db: Arc<DbPool>,
}

impl ReviewService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Creates the review and recomputes the facility's rating as the mean
    /// over every review including the new one.
    #[instrument(skip(self, request), fields(facility_id = request.facility_id, rating = request.rating))]
    pub async fn create(&self, request: CreateReviewRequest) -> Result<review::Model, ServiceError> {
        request.validate()?;

        let db = &*self.db;
        let txn = db.begin().await?;

        let site = facility::Entity::find_by_id(request.facility_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Facility {} not found", request.facility_id))
            })?;

        let created = review::ActiveModel {
            facility_id: Set(request.facility_id),
            user_id: Set(request.user_id),
            rating: Set(request.rating),
            comment: Set(request.comment),
            image_path: Set(request.image_path),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        // Recompute the aggregate from all rows including the new one.
        let all = review::Entity::find()
            .filter(review::Column::FacilityId.eq(request.facility_id))
            .all(&txn)
            .await?;
        let count = all.len() as i32;
        let mean = all.iter().map(|r| r.rating as f64).sum::<f64>() / count as f64;

        let mut site_active: facility::ActiveModel = site.clone().into();
        site_active.rating = Set(mean);
        site_active.total_reviews = Set(count);
        site_active.update(&txn).await?;

        if let Some(owner_id) = site.owner_id {
            let author = NotificationService::display_name(&txn, Some(request.user_id)).await?;
            NotificationService::create_in(
                &txn,
                NewNotification {
                    owner_id,
                    facility_id: site.id,
                    user_id: Some(request.user_id),
                    kind: "review".to_string(),
                    message: format!(
                        "{} rated {} {} stars",
                        author, site.name, request.rating
                    ),
                },
            )
            .await?;
        }

        txn.commit().await?;
        info!(review_id = created.id, "review created");
        Ok(created)
    }
}
