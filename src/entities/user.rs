use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A visitor. Guests have no credential; registered users carry an argon2
/// password hash.
///
/// `current_facility_id` and `active_since` are set together while a usage
/// session is open and cleared together when it ends.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(unique)]
    pub username: String,

    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    pub is_guest: bool,
    pub current_facility_id: Option<i64>,
    pub active_since: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::usage_history::Entity")]
    UsageHistory,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::usage_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UsageHistory.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Model {
    /// A session is open while both active fields are set.
    pub fn is_using(&self) -> bool {
        self.current_facility_id.is_some() && self.active_since.is_some()
    }
}

impl ActiveModelBehavior for ActiveModel {}
