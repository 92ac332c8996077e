//! Content domain of the Atrium site backend: admin authentication,
//! content models, the repository ports with their sqlite adapters,
//! outbound mail and upload storage.

pub mod auth;
pub mod content;
pub mod mail;
pub mod persistence;
pub mod ports;
pub mod uploads;
