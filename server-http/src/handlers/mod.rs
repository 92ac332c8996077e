pub mod auth;
pub mod cache_admin;
pub mod contact;
pub mod education;
pub mod get_involved;
pub mod health;
pub mod items;
pub mod media;
pub mod news;
pub mod newsletter;
pub mod uploads;

pub use health::health_check;
