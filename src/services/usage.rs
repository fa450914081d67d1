use crate::{
    db::DbPool,
    entities::{
        facility, payment,
        payment::PaymentStatus,
        usage_history, user,
    },
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// The usage-session workflow: StartUsing / StopUsing, payment-gated for
/// priced facilities.
///
/// The occupancy counter is moved with database-side arithmetic
/// (`current_users = current_users + 1`, decrement guarded by
/// `current_users > 0`) so two racing requests cannot lose an update.
/// There is no idempotency guard: a repeated start for an already-active
/// visitor increments the counter again and opens a second history row.
#[derive(Clone)]
pub struct UsageService {
    db: Arc<DbPool>,
}

impl UsageService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Opens a usage session for the visitor at the facility.
    ///
    /// Fails with `PaymentRequired` when the facility is priced and no
    /// confirmed payment exists for this (visitor, facility) pair.
    #[instrument(skip(self))]
    pub async fn start_using(&self, user_id: i64, facility_id: i64) -> Result<(), ServiceError> {
        let db = &*self.db;
        let txn = db.begin().await?;

        let visitor = user::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user_id)))?;

        let site = facility::Entity::find_by_id(facility_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Facility {} not found", facility_id))
            })?;

        if !site.is_free {
            let confirmed = payment::Entity::find()
                .filter(payment::Column::UserId.eq(user_id))
                .filter(payment::Column::FacilityId.eq(facility_id))
                .filter(payment::Column::Status.eq(PaymentStatus::Confirmed))
                .order_by_desc(payment::Column::CreatedAt)
                .one(&txn)
                .await?;

            if confirmed.is_none() {
                return Err(ServiceError::PaymentRequired(format!(
                    "Confirmed payment required to use facility {}",
                    facility_id
                )));
            }
        }

        let now = Utc::now();

        let mut active: user::ActiveModel = visitor.into();
        active.current_facility_id = Set(Some(facility_id));
        active.active_since = Set(Some(now));
        active.update(&txn).await?;

        facility::Entity::update_many()
            .col_expr(
                facility::Column::CurrentUsers,
                Expr::col(facility::Column::CurrentUsers).add(1),
            )
            .filter(facility::Column::Id.eq(facility_id))
            .exec(&txn)
            .await?;

        let session = usage_history::ActiveModel {
            user_id: Set(user_id),
            facility_id: Set(facility_id),
            start_time: Set(now),
            end_time: Set(None),
            duration_minutes: Set(None),
            created_at: Set(now),
            ..Default::default()
        };
        session.insert(&txn).await?;

        txn.commit().await?;
        info!(user_id, facility_id, "usage session started");
        Ok(())
    }

    /// Closes the visitor's usage session. Safe no-op when the visitor is
    /// not using any facility.
    #[instrument(skip(self))]
    pub async fn stop_using(&self, user_id: i64) -> Result<(), ServiceError> {
        let db = &*self.db;
        let txn = db.begin().await?;

        let visitor = user::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user_id)))?;

        if let Some(facility_id) = visitor.current_facility_id {
            // Guarded decrement keeps the counter at >= 0.
            facility::Entity::update_many()
                .col_expr(
                    facility::Column::CurrentUsers,
                    Expr::col(facility::Column::CurrentUsers).sub(1),
                )
                .filter(facility::Column::Id.eq(facility_id))
                .filter(facility::Column::CurrentUsers.gt(0))
                .exec(&txn)
                .await?;

            if visitor.active_since.is_some() {
                let open = usage_history::Entity::find()
                    .filter(usage_history::Column::UserId.eq(user_id))
                    .filter(usage_history::Column::FacilityId.eq(facility_id))
                    .filter(usage_history::Column::EndTime.is_null())
                    .order_by_asc(usage_history::Column::Id)
                    .one(&txn)
                    .await?;

                if let Some(session) = open {
                    let now = Utc::now();
                    let elapsed = now - session.start_time;
                    let mut active: usage_history::ActiveModel = session.into();
                    active.end_time = Set(Some(now));
                    active.duration_minutes = Set(Some(elapsed.num_minutes()));
                    active.update(&txn).await?;
                }
            }
        }

        // Active fields are cleared even when no open history row was found.
        let mut active: user::ActiveModel = visitor.into();
        active.current_facility_id = Set(None);
        active.active_since = Set(None);
        active.update(&txn).await?;

        txn.commit().await?;
        info!(user_id, "usage session stopped");
        Ok(())
    }
}
