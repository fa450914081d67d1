use crate::{
    db::DbPool,
    entities::{facility, owner},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

// New facilities land near the pilot area, fanned out so markers do not
// overlap on the map.
const BASE_LATITUDE: f64 = 10.88;
const BASE_LONGITUDE: f64 = 106.79;
const POSITION_STEP: f64 = 0.001;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OwnerProfile {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
    #[validate(length(min = 1, max = 20, message = "Phone must be between 1 and 20 characters"))]
    pub phone: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OwnerFacilitySeed {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 200,
        message = "Address must be between 1 and 200 characters"
    ))]
    pub address: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterOwnerRequest {
    #[validate]
    pub owner: OwnerProfile,
    #[serde(default)]
    #[validate]
    pub restrooms: Vec<OwnerFacilitySeed>,
}

/// Owner onboarding: profile upsert plus initial facilities, all-or-nothing.
#[derive(Clone)]
pub struct OwnerService {
    db: Arc<DbPool>,
}

impl OwnerService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Upserts the owner by email and creates the submitted facilities in
    /// one transaction; any failure rolls the whole registration back.
    #[instrument(skip(self, request), fields(email = %request.owner.email))]
    pub async fn register_with_facilities(
        &self,
        request: RegisterOwnerRequest,
    ) -> Result<i64, ServiceError> {
        request.validate()?;

        let db = &*self.db;
        let txn = db.begin().await?;

        let existing = owner::Entity::find()
            .filter(owner::Column::Email.eq(request.owner.email.clone()))
            .one(&txn)
            .await?;

        let account = match existing {
            // Pre-created by auth registration; complete the profile.
            Some(stub) => {
                let mut active: owner::ActiveModel = stub.into();
                active.name = Set(request.owner.name.clone());
                active.phone = Set(request.owner.phone.clone());
                active.update(&txn).await?
            }
            None => {
                owner::ActiveModel {
                    name: Set(request.owner.name.clone()),
                    email: Set(request.owner.email.clone()),
                    phone: Set(request.owner.phone.clone()),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        for (i, seed) in request.restrooms.iter().enumerate() {
            facility::ActiveModel {
                name: Set(seed.name.clone()),
                address: Set(seed.address.clone()),
                latitude: Set(BASE_LATITUDE + i as f64 * POSITION_STEP),
                longitude: Set(BASE_LONGITUDE + i as f64 * POSITION_STEP),
                is_free: Set(true),
                price: Set(0),
                current_users: Set(0),
                rating: Set(5.0),
                total_reviews: Set(0),
                admin_contact: Set(Some(request.owner.email.clone())),
                image_url: Set(None),
                owner_id: Set(Some(account.id)),
                male_standing: Set(0),
                male_sitting: Set(0),
                female_sitting: Set(0),
                disabled_access: Set(false),
                images: Set(None),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        info!(owner_id = account.id, facilities = request.restrooms.len(), "owner registered");
        Ok(account.id)
    }
}
