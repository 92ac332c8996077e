use super::error::AuthError;
use super::models::Admin;
use async_trait::async_trait;

#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Create a new admin
    async fn create(&self, admin: Admin) -> Result<Admin, AuthError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AuthError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Admin>, AuthError>;

    /// Replace the stored password hash
    async fn update_password(&self, id: &str, password_hash: &str) -> Result<(), AuthError>;

    async fn username_exists(&self, username: &str) -> Result<bool, AuthError>;
}
