use super::error::AuthError;
use super::models::{Admin, IssuedToken};
use super::password::{hash_password, verify_password};
use super::repository::AdminRepository;
use super::token::TokenService;
use std::sync::Arc;
use tracing::info;

pub struct AuthService {
    admin_repo: Arc<dyn AdminRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(admin_repo: Arc<dyn AdminRepository>, tokens: Arc<TokenService>) -> Self {
        Self { admin_repo, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Authenticate an admin by username and password
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Admin, AuthError> {
        let admin = self
            .admin_repo
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &admin.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(admin)
    }

    /// Authenticate and issue a bearer token
    pub async fn login(&self, username: &str, password: &str) -> Result<(Admin, IssuedToken), AuthError> {
        let admin = self.authenticate(username, password).await?;
        let issued = self.tokens.issue(&admin)?;
        info!(username = %admin.username, "Admin logged in");
        Ok((admin, issued))
    }

    pub async fn get_admin(&self, id: &str) -> Result<Admin, AuthError> {
        self.admin_repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::AdminNotFound)
    }

    pub async fn change_password(
        &self,
        admin_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let admin = self.get_admin(admin_id).await?;

        if !verify_password(current_password, &admin.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let password_hash = hash_password(new_password)?;
        self.admin_repo
            .update_password(&admin.id, &password_hash)
            .await
    }

    /// Create the admin account if the username is not taken yet.
    /// Returns `true` when an account was created.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        if self.admin_repo.username_exists(username).await? {
            return Ok(false);
        }

        let admin = Admin::new(username.to_string(), hash_password(password)?);
        self.admin_repo.create(admin).await?;
        info!(username = %username, "Seeded admin account");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{SqliteAdminRepository, create_pool};
    use std::time::Duration;

    async fn service() -> AuthService {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        AuthService::new(
            Arc::new(SqliteAdminRepository::new(pool)),
            Arc::new(TokenService::new("test-secret", Duration::from_secs(3600))),
        )
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let auth = service().await;
        assert!(auth.ensure_admin("admin", "admin1234").await.unwrap());
        assert!(!auth.ensure_admin("admin", "other-pass1").await.unwrap());

        // The original password still works.
        assert!(auth.authenticate("admin", "admin1234").await.is_ok());
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let auth = service().await;
        auth.ensure_admin("admin", "admin1234").await.unwrap();

        let (admin, issued) = auth.login("admin", "admin1234").await.unwrap();
        let claims = auth.tokens().verify(&issued.token).await.unwrap();
        assert_eq!(claims.sub, admin.id);
        assert_eq!(claims.username, "admin");
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let auth = service().await;
        auth.ensure_admin("admin", "admin1234").await.unwrap();

        assert!(matches!(
            auth.login("admin", "wrong-pass1").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("ghost", "admin1234").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_change_password() {
        let auth = service().await;
        auth.ensure_admin("admin", "admin1234").await.unwrap();
        let admin = auth.authenticate("admin", "admin1234").await.unwrap();

        assert!(matches!(
            auth.change_password(&admin.id, "nope", "newpass123").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.change_password(&admin.id, "admin1234", "short").await,
            Err(AuthError::WeakPassword)
        ));

        auth.change_password(&admin.id, "admin1234", "newpass123")
            .await
            .unwrap();
        assert!(auth.authenticate("admin", "newpass123").await.is_ok());
        assert!(auth.authenticate("admin", "admin1234").await.is_err());
    }
}
