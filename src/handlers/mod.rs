pub mod auth;
pub mod chat;
pub mod facilities;
pub mod owners;
pub mod payments;
pub mod reviews;
pub mod users;

use crate::db::DbPool;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub facilities: Arc<crate::services::facilities::FacilityService>,
    pub usage: Arc<crate::services::usage::UsageService>,
    pub payments: Arc<crate::services::payments::PaymentService>,
    pub notifications: Arc<crate::services::notifications::NotificationService>,
    pub reviews: Arc<crate::services::reviews::ReviewService>,
    pub chat: Arc<crate::services::chat::ChatService>,
    pub auth: Arc<crate::services::auth::AuthService>,
    pub users: Arc<crate::services::users::UserService>,
    pub owners: Arc<crate::services::owners::OwnerService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            facilities: Arc::new(crate::services::facilities::FacilityService::new(db.clone())),
            usage: Arc::new(crate::services::usage::UsageService::new(db.clone())),
            payments: Arc::new(crate::services::payments::PaymentService::new(db.clone())),
            notifications: Arc::new(crate::services::notifications::NotificationService::new(
                db.clone(),
            )),
            reviews: Arc::new(crate::services::reviews::ReviewService::new(db.clone())),
            chat: Arc::new(crate::services::chat::ChatService::new(db.clone())),
            auth: Arc::new(crate::services::auth::AuthService::new(db.clone())),
            users: Arc::new(crate::services::users::UserService::new(db.clone())),
            owners: Arc::new(crate::services::owners::OwnerService::new(db)),
        }
    }
}
