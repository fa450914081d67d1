use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A physical restroom location listed in the system.
///
/// `current_users` is the live occupancy counter and never goes below zero;
/// `rating` is the arithmetic mean of all review ratings.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "facilities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Address must be between 1 and 200 characters"
    ))]
    pub address: String,

    pub latitude: f64,
    pub longitude: f64,
    pub is_free: bool,
    /// Price in whole currency units; 0 for free facilities
    pub price: i64,
    pub current_users: i32,
    pub rating: f64,
    pub total_reviews: i32,
    pub admin_contact: Option<String>,
    pub image_url: Option<String>,
    pub owner_id: Option<i64>,
    pub male_standing: i32,
    pub male_sitting: i32,
    pub female_sitting: i32,
    pub disabled_access: bool,
    /// Ordered gallery of image URLs, stored as a JSON array
    pub images: Option<Json>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::owner::Entity",
        from = "Column::OwnerId",
        to = "super::owner::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::chat_message::Entity")]
    ChatMessages,
    #[sea_orm(has_many = "super::usage_history::Entity")]
    UsageHistory,
    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::owner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
