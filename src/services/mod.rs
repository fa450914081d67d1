pub mod auth;
pub mod chat;
pub mod facilities;
pub mod notifications;
pub mod owners;
pub mod payments;
pub mod reviews;
pub mod usage;
pub mod users;
