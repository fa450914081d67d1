pub mod chat_message;
pub mod facility;
pub mod notification;
pub mod owner;
pub mod payment;
pub mod review;
pub mod usage_history;
pub mod user;
