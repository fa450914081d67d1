use crate::{
    db::DbPool,
    entities::{owner, user},
    errors::ServiceError,
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

/// Which kind of account is being registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Owner,
}

/// Account payload returned by register and login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub id: i64,
    pub username: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_guest: Option<bool>,
}

/// Registration and login for visitors and owners.
///
/// Visitor passwords are stored as argon2 hashes. Owner accounts are keyed
/// by email and carry no credential; an owner registration here creates a
/// stub record completed later through the owner-registration flow.
#[derive(Clone)]
pub struct AuthService {
    db: Arc<DbPool>,
}

impl AuthService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<AccountResponse, ServiceError> {
        let db = &*self.db;

        let existing_user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await?;
        let existing_owner = owner::Entity::find()
            .filter(owner::Column::Email.eq(username))
            .one(db)
            .await?;
        if existing_user.is_some() || existing_owner.is_some() {
            return Err(ServiceError::Conflict("Username already exists".to_string()));
        }

        match role {
            Role::Owner => {
                // Name and phone are filled in by the owner-registration flow.
                let account = owner::ActiveModel {
                    name: Set(username.to_string()),
                    email: Set(username.to_string()),
                    phone: Set(String::new()),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(db)
                .await?;

                info!(owner_id = account.id, "owner account registered");
                Ok(AccountResponse {
                    id: account.id,
                    username: account.email.clone(),
                    role: Role::Owner,
                    name: None,
                    email: Some(account.email),
                    phone: None,
                    is_guest: None,
                })
            }
            Role::User => {
                let hash = hash_password(password)?;
                let account = user::ActiveModel {
                    username: Set(username.to_string()),
                    password_hash: Set(Some(hash)),
                    is_guest: Set(false),
                    current_facility_id: Set(None),
                    active_since: Set(None),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(db)
                .await?;

                info!(user_id = account.id, "user account registered");
                Ok(AccountResponse {
                    id: account.id,
                    username: account.username,
                    role: Role::User,
                    name: None,
                    email: None,
                    phone: None,
                    is_guest: Some(false),
                })
            }
        }
    }

    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AccountResponse, ServiceError> {
        let db = &*self.db;

        let registered = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::IsGuest.eq(false))
            .one(db)
            .await?;
        if let Some(account) = registered {
            if let Some(hash) = account.password_hash.as_deref() {
                if verify_password(password, hash) {
                    return Ok(AccountResponse {
                        id: account.id,
                        username: account.username,
                        role: Role::User,
                        name: None,
                        email: None,
                        phone: None,
                        is_guest: Some(false),
                    });
                }
            }
            return Err(ServiceError::AuthError("Invalid credentials".to_string()));
        }

        // Owners log in by email alone; they carry no credential.
        let account = owner::Entity::find()
            .filter(owner::Column::Email.eq(username))
            .one(db)
            .await?;
        if let Some(account) = account {
            return Ok(AccountResponse {
                id: account.id,
                username: account.email.clone(),
                role: Role::Owner,
                name: Some(account.name),
                email: Some(account.email),
                phone: Some(account.phone),
                is_guest: None,
            });
        }

        Err(ServiceError::AuthError("Invalid credentials".to_string()))
    }

    #[instrument(skip(self))]
    pub async fn username_exists(&self, username: &str) -> Result<bool, ServiceError> {
        let existing = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.db)
            .await?;
        Ok(existing.is_some())
    }
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::InternalError(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter2").expect("hashing succeeds");
        assert_ne!(hash, "hunter2");
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("hunter2", "not-a-phc-string"));
    }
}
