use crate::{
    db::DbPool,
    entities::{
        facility, owner, payment,
        payment::{PaymentMethod, PaymentStatus},
        user,
    },
    errors::ServiceError,
    services::{
        facilities::OwnerKey,
        notifications::{NewNotification, NotificationService},
    },
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

#[derive(Debug, Clone)]
pub struct SubmitPaymentRequest {
    pub user_id: i64,
    pub facility_id: i64,
    pub method: PaymentMethod,
    pub amount: i64,
    pub transfer_image_path: Option<String>,
    pub note: Option<String>,
}

/// Outcome of an owner decision on a pending payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Confirm,
    Reject,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i64,
    pub status: PaymentStatus,
}

/// Payment as seen by the owner dashboard, joined with visitor and facility
/// names.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OwnerPaymentResponse {
    pub id: i64,
    pub user_name: String,
    pub facility_name: String,
    pub method: PaymentMethod,
    pub amount: i64,
    pub status: PaymentStatus,
    pub transfer_image_path: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// Payment as seen by the visitor, joined with the facility name.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserPaymentResponse {
    pub id: i64,
    pub facility_name: String,
    pub method: PaymentMethod,
    pub amount: i64,
    pub status: PaymentStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// Lets the client distinguish "must pay" from "awaiting confirmation".
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentStatusResponse {
    pub payment_confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_pending_payment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_payment_id: Option<i64>,
}

/// Payment-confirmation workflow. Cash claims auto-confirm at creation;
/// transfer claims pend until the owner confirms or rejects them.
#[derive(Clone)]
pub struct PaymentService {
    db: Arc<DbPool>,
}

impl PaymentService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Records a payment claim. A transfer claim additionally notifies the
    /// facility's owner, in the same transaction.
    #[instrument(skip(self, request), fields(user_id = request.user_id, facility_id = request.facility_id))]
    pub async fn submit(&self, request: SubmitPaymentRequest) -> Result<PaymentResponse, ServiceError> {
        let db = &*self.db;
        let txn = db.begin().await?;

        let site = facility::Entity::find_by_id(request.facility_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Facility {} not found", request.facility_id))
            })?;

        let owner_id = site
            .owner_id
            .ok_or_else(|| ServiceError::NotFound("Owner not found".to_string()))?;
        let account = owner::Entity::find_by_id(owner_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Owner not found".to_string()))?;

        let status = match request.method {
            PaymentMethod::Cash => PaymentStatus::Confirmed,
            PaymentMethod::Transfer => PaymentStatus::Pending,
        };

        let claim = payment::ActiveModel {
            user_id: Set(request.user_id),
            facility_id: Set(request.facility_id),
            owner_id: Set(account.id),
            method: Set(request.method),
            amount: Set(request.amount),
            status: Set(status),
            transfer_image_path: Set(request.transfer_image_path),
            note: Set(request.note),
            confirmed_at: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let claim = claim.insert(&txn).await?;

        if claim.method == PaymentMethod::Transfer {
            NotificationService::create_in(
                &txn,
                NewNotification {
                    owner_id: account.id,
                    facility_id: site.id,
                    user_id: Some(request.user_id),
                    kind: "payment_confirmation".to_string(),
                    message: format!(
                        "Transfer payment of {} for {} awaits confirmation",
                        claim.amount, site.name
                    ),
                },
            )
            .await?;
        }

        txn.commit().await?;
        info!(payment_id = claim.id, status = ?claim.status, "payment submitted");
        Ok(PaymentResponse {
            id: claim.id,
            status: claim.status,
        })
    }

    /// Applies the owner's decision and notifies the visitor with the
    /// outcome. The confirmation timestamp is stamped only on confirm.
    ///
    /// Terminal states are not guarded: re-invoking on a confirmed or
    /// rejected payment re-transitions and re-notifies.
    #[instrument(skip(self))]
    pub async fn confirm(
        &self,
        payment_id: i64,
        action: ConfirmAction,
    ) -> Result<PaymentResponse, ServiceError> {
        let db = &*self.db;
        let txn = db.begin().await?;

        let claim = payment::Entity::find_by_id(payment_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Payment {} not found", payment_id))
            })?;

        let (status, confirmed_at, message) = match action {
            ConfirmAction::Confirm => (
                PaymentStatus::Confirmed,
                Some(Utc::now()),
                format!("Payment of {} was confirmed", claim.amount),
            ),
            ConfirmAction::Reject => (
                PaymentStatus::Rejected,
                None,
                format!("Payment of {} was rejected", claim.amount),
            ),
        };

        let owner_id = claim.owner_id;
        let facility_id = claim.facility_id;
        let user_id = claim.user_id;

        let mut active: payment::ActiveModel = claim.into();
        active.status = Set(status);
        if confirmed_at.is_some() {
            active.confirmed_at = Set(confirmed_at);
        }
        let updated = active.update(&txn).await?;

        NotificationService::create_in(
            &txn,
            NewNotification {
                owner_id,
                facility_id,
                user_id: Some(user_id),
                kind: "payment_status".to_string(),
                message,
            },
        )
        .await?;

        txn.commit().await?;
        info!(payment_id, status = ?updated.status, "payment decision applied");
        Ok(PaymentResponse {
            id: updated.id,
            status: updated.status,
        })
    }

    /// Whether a confirmed payment exists for the pair; the most recent one
    /// wins. Reports a pending claim when no confirmed one exists.
    #[instrument(skip(self))]
    pub async fn status_for(
        &self,
        user_id: i64,
        facility_id: i64,
    ) -> Result<PaymentStatusResponse, ServiceError> {
        let db = &*self.db;

        let latest = |status: PaymentStatus| {
            payment::Entity::find()
                .filter(payment::Column::UserId.eq(user_id))
                .filter(payment::Column::FacilityId.eq(facility_id))
                .filter(payment::Column::Status.eq(status))
                .order_by_desc(payment::Column::CreatedAt)
        };

        if let Some(confirmed) = latest(PaymentStatus::Confirmed).one(db).await? {
            return Ok(PaymentStatusResponse {
                payment_confirmed: true,
                payment_id: Some(confirmed.id),
                confirmed_at: confirmed.confirmed_at,
                has_pending_payment: None,
                pending_payment_id: None,
            });
        }

        let pending = latest(PaymentStatus::Pending).one(db).await?;
        Ok(PaymentStatusResponse {
            payment_confirmed: false,
            payment_id: None,
            confirmed_at: None,
            has_pending_payment: Some(pending.is_some()),
            pending_payment_id: pending.map(|p| p.id),
        })
    }

    /// All payments addressed to an owner, newest first, with visitor and
    /// facility names resolved.
    #[instrument(skip(self))]
    pub async fn list_for_owner(
        &self,
        key: OwnerKey,
    ) -> Result<Vec<OwnerPaymentResponse>, ServiceError> {
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

        let claims = payment::Entity::find()
            .filter(payment::Column::OwnerId.eq(account.id))
            .order_by_desc(payment::Column::CreatedAt)
            .all(db)
            .await?;

        let user_ids: Vec<i64> = claims.iter().map(|p| p.user_id).collect();
        let facility_ids: Vec<i64> = claims.iter().map(|p| p.facility_id).collect();

        let users: HashMap<i64, String> = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();
        let facilities: HashMap<i64, String> = facility::Entity::find()
            .filter(facility::Column::Id.is_in(facility_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|f| (f.id, f.name))
            .collect();

        Ok(claims
            .into_iter()
            .map(|p| OwnerPaymentResponse {
                id: p.id,
                user_name: users.get(&p.user_id).cloned().unwrap_or_default(),
                facility_name: facilities.get(&p.facility_id).cloned().unwrap_or_default(),
                method: p.method,
                amount: p.amount,
                status: p.status,
                transfer_image_path: p.transfer_image_path,
                note: p.note,
                created_at: p.created_at,
                confirmed_at: p.confirmed_at,
            })
            .collect())
    }

    /// All payments a visitor has submitted, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<UserPaymentResponse>, ServiceError> {
        let db = &*self.db;
        let claims = payment::Entity::find()
            .filter(payment::Column::UserId.eq(user_id))
            .order_by_desc(payment::Column::CreatedAt)
            .all(db)
            .await?;

        let facility_ids: Vec<i64> = claims.iter().map(|p| p.facility_id).collect();
        let facilities: HashMap<i64, String> = facility::Entity::find()
            .filter(facility::Column::Id.is_in(facility_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|f| (f.id, f.name))
            .collect();

        Ok(claims
            .into_iter()
            .map(|p| UserPaymentResponse {
                id: p.id,
                facility_name: facilities.get(&p.facility_id).cloned().unwrap_or_default(),
                method: p.method,
                amount: p.amount,
                status: p.status,
                note: p.note,
                created_at: p.created_at,
                confirmed_at: p.confirmed_at,
            })
            .collect())
    }
}
