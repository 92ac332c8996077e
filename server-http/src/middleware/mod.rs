pub mod authentication;
pub mod response_cache;

pub use authentication::{AuthenticatedAdmin, require_admin};
pub use response_cache::{X_CACHE, cache_response};
