use crate::{
    db::DbPool,
    entities::{facility, owner, review},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

// Fallback coordinates for facilities submitted without a position
// (the Di An, Binh Duong pilot area).
const DEFAULT_LATITUDE: f64 = 10.88;
const DEFAULT_LONGITUDE: f64 = 106.79;

/// Fixture counts for the male side of a facility.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct MaleFixtures {
    pub standing: Option<i32>,
    pub sitting: Option<i32>,
}

/// Fixture counts for the female side of a facility.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct FemaleFixtures {
    pub sitting: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFacilityRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 200,
        message = "Address must be between 1 and 200 characters"
    ))]
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Owner's contact email; resolves which owner the facility belongs to
    pub admin_contact: Option<String>,
    pub is_free: Option<bool>,
    pub price: Option<i64>,
    #[serde(rename = "maleToilets")]
    pub male_toilets: Option<MaleFixtures>,
    #[serde(rename = "femaleToilets")]
    pub female_toilets: Option<FemaleFixtures>,
    #[serde(rename = "disabledAccess")]
    pub disabled_access: Option<bool>,
    pub images: Option<Vec<String>>,
}

/// Partial update; only provided fields change.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFacilityRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_free: Option<bool>,
    pub price: Option<i64>,
    pub admin_contact: Option<String>,
    #[serde(rename = "maleToilets")]
    pub male_toilets: Option<MaleFixtures>,
    #[serde(rename = "femaleToilets")]
    pub female_toilets: Option<FemaleFixtures>,
    #[serde(rename = "disabledAccess")]
    pub disabled_access: Option<bool>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FacilityResponse {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_free: bool,
    pub price: i64,
    pub current_users: i32,
    pub rating: f64,
    pub total_reviews: i32,
    pub admin_contact: Option<String>,
    pub image_url: Option<String>,
    pub male_standing: i32,
    pub male_sitting: i32,
    pub female_sitting: i32,
    pub disabled_access: bool,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Facility detail together with its most recent reviews.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FacilityDetailResponse {
    #[serde(flatten)]
    pub facility: FacilityResponse,
    pub reviews: Vec<ReviewResponse>,
}

/// Lookup key for owner-scoped facility listings; the route accepts either
/// the numeric owner id or the owner's email in the same path segment.
#[derive(Debug, Clone)]
pub enum OwnerKey {
    Id(i64),
    Email(String),
}

impl From<&str> for OwnerKey {
    fn from(segment: &str) -> Self {
        match segment.parse::<i64>() {
            Ok(id) => OwnerKey::Id(id),
            Err(_) => OwnerKey::Email(segment.to_string()),
        }
    }
}

impl From<facility::Model> for FacilityResponse {
    fn from(model: facility::Model) -> Self {
        let images = images_from_json(model.images.as_ref());
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            latitude: model.latitude,
            longitude: model.longitude,
            is_free: model.is_free,
            price: model.price,
            current_users: model.current_users,
            rating: model.rating,
            total_reviews: model.total_reviews,
            admin_contact: model.admin_contact,
            image_url: model.image_url,
            male_standing: model.male_standing,
            male_sitting: model.male_sitting,
            female_sitting: model.female_sitting,
            disabled_access: model.disabled_access,
            images,
            created_at: model.created_at,
        }
    }
}

fn images_from_json(value: Option<&serde_json::Value>) -> Vec<String> {
    value
        .and_then(|v| serde_json::from_value::<Vec<String>>(v.clone()).ok())
        .unwrap_or_default()
}

fn images_to_json(images: Option<Vec<String>>) -> Option<serde_json::Value> {
    images.map(serde_json::Value::from)
}

const RECENT_REVIEWS: u64 = 10;

/// CRUD over facilities plus owner-scoped listings.
#[derive(Clone)]
pub struct FacilityService {
    db: Arc<DbPool>,
}

impl FacilityService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<FacilityResponse>, ServiceError> {
        let rows = facility::Entity::find().all(&*self.db).await?;
        Ok(rows.into_iter().map(FacilityResponse::from).collect())
    }

    /// Detail view with the 10 most recent reviews.
    #[instrument(skip(self))]
    pub async fn get_with_reviews(
        &self,
        facility_id: i64,
    ) -> Result<FacilityDetailResponse, ServiceError> {
        let db = &*self.db;
        let site = facility::Entity::find_by_id(facility_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Facility {} not found", facility_id))
            })?;

        let reviews = review::Entity::find()
            .filter(review::Column::FacilityId.eq(facility_id))
            .order_by_desc(review::Column::CreatedAt)
            .limit(RECENT_REVIEWS)
            .all(db)
            .await?;

        Ok(FacilityDetailResponse {
            facility: site.into(),
            reviews: reviews
                .into_iter()
                .map(|r| ReviewResponse {
                    id: r.id,
                    rating: r.rating,
                    comment: r.comment,
                    image_path: r.image_path,
                    created_at: r.created_at,
                })
                .collect(),
        })
    }

    /// Creates a facility for the owner resolved from `admin_contact`.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: CreateFacilityRequest) -> Result<i64, ServiceError> {
        request.validate()?;

        let db = &*self.db;
        let contact = request.admin_contact.clone().ok_or_else(|| {
            ServiceError::ValidationError("admin_contact (email) is required".to_string())
        })?;

        let account = owner::Entity::find()
            .filter(owner::Column::Email.eq(contact.clone()))
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound("Owner not found with this email".to_string())
            })?;

        let male = request.male_toilets.unwrap_or_default();
        let female = request.female_toilets.unwrap_or_default();

        let created = facility::ActiveModel {
            name: Set(request.name),
            address: Set(request.address),
            latitude: Set(request.latitude.unwrap_or(DEFAULT_LATITUDE)),
            longitude: Set(request.longitude.unwrap_or(DEFAULT_LONGITUDE)),
            is_free: Set(request.is_free.unwrap_or(true)),
            price: Set(request.price.unwrap_or(0)),
            current_users: Set(0),
            rating: Set(0.0),
            total_reviews: Set(0),
            admin_contact: Set(Some(contact)),
            image_url: Set(None),
            owner_id: Set(Some(account.id)),
            male_standing: Set(male.standing.unwrap_or(0)),
            male_sitting: Set(male.sitting.unwrap_or(0)),
            female_sitting: Set(female.sitting.unwrap_or(0)),
            disabled_access: Set(request.disabled_access.unwrap_or(false)),
            images: Set(images_to_json(request.images)),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(facility_id = created.id, owner_id = account.id, "facility created");
        Ok(created.id)
    }

    /// Applies only the provided fields; nested fixture objects are partial
    /// too, so an update of one count leaves the others untouched.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        facility_id: i64,
        request: UpdateFacilityRequest,
    ) -> Result<(), ServiceError> {
        let db = &*self.db;
        let site = facility::Entity::find_by_id(facility_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Facility {} not found", facility_id))
            })?;

        let mut active: facility::ActiveModel = site.clone().into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(address) = request.address {
            active.address = Set(address);
        }
        if let Some(latitude) = request.latitude {
            active.latitude = Set(latitude);
        }
        if let Some(longitude) = request.longitude {
            active.longitude = Set(longitude);
        }
        if let Some(is_free) = request.is_free {
            active.is_free = Set(is_free);
        }
        if let Some(price) = request.price {
            active.price = Set(price);
        }
        if let Some(contact) = request.admin_contact {
            active.admin_contact = Set(Some(contact));
        }
        if let Some(disabled_access) = request.disabled_access {
            active.disabled_access = Set(disabled_access);
        }
        if let Some(male) = request.male_toilets {
            active.male_standing = Set(male.standing.unwrap_or(site.male_standing));
            active.male_sitting = Set(male.sitting.unwrap_or(site.male_sitting));
        }
        if let Some(female) = request.female_toilets {
            active.female_sitting = Set(female.sitting.unwrap_or(site.female_sitting));
        }
        if let Some(images) = request.images {
            active.images = Set(images_to_json(Some(images)));
        }
        active.update(db).await?;

        info!(facility_id, "facility updated");
        Ok(())
    }

    /// Owner-scoped listing by id or email.
    #[instrument(skip(self))]
    pub async fn list_for_owner(&self, key: OwnerKey) -> Result<Vec<FacilityResponse>, ServiceError> {
        let db = &*self.db;
        let owner_id = match key {
            OwnerKey::Id(id) => id,
            OwnerKey::Email(email) => {
                owner::Entity::find()
                    .filter(owner::Column::Email.eq(email.clone()))
                    .one(db)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Owner {} not found", email))
                    })?
                    .id
            }
        };

        let rows = facility::Entity::find()
            .filter(facility::Column::OwnerId.eq(owner_id))
            .all(db)
            .await?;
        Ok(rows.into_iter().map(FacilityResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_key_parses_numeric_segment_as_id() {
        assert!(matches!(OwnerKey::from("42"), OwnerKey::Id(42)));
        assert!(matches!(OwnerKey::from("a@b.vn"), OwnerKey::Email(_)));
    }

    #[test]
    fn images_round_trip_through_json() {
        let urls = vec!["https://img/1.jpg".to_string(), "https://img/2.jpg".to_string()];
        let json = images_to_json(Some(urls.clone()));
        assert_eq!(images_from_json(json.as_ref()), urls);
        assert!(images_from_json(None).is_empty());
    }
}
