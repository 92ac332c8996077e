// Public API
pub mod auth_service;
pub mod error;
pub mod models;
pub mod password;
pub mod repository;
pub mod token;

// Re-export commonly used types
pub use auth_service::AuthService;
pub use error::AuthError;
pub use models::{Admin, Claims, IssuedToken};
pub use repository::AdminRepository;
pub use token::{TokenService, extract_bearer_token};
