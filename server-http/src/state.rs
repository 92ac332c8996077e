use atrium::auth::{AuthService, TokenService};
use atrium::mail::Mailer;
use atrium::persistence::{
    SqliteAdminRepository, SqliteContactRepository, SqliteEducationRepository,
    SqliteItemRepository, SqliteMediaRepository, SqliteNewsRepository,
    SqliteNewsletterRepository, SqliteSubmissionRepository,
};
use atrium::ports::{
    ContactRepository, EducationRepository, ItemRepository, MediaRepository, NewsRepository,
    NewsletterRepository, SubmissionRepository,
};
use atrium::uploads::UploadStore;
use cache_engine::ResponseCache;
use shared::config::Config;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemRepository>,
    pub media: Arc<dyn MediaRepository>,
    pub news: Arc<dyn NewsRepository>,
    pub education: Arc<dyn EducationRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub contact: Arc<dyn ContactRepository>,
    pub newsletter: Arc<dyn NewsletterRepository>,
    pub auth: Arc<AuthService>,
    pub cache: Arc<ResponseCache>,
    pub mailer: Arc<dyn Mailer>,
    pub uploads: Arc<dyn UploadStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the sqlite repositories and the auth service around one pool.
    pub fn new(
        pool: SqlitePool,
        config: Arc<Config>,
        cache: Arc<ResponseCache>,
        mailer: Arc<dyn Mailer>,
        uploads: Arc<dyn UploadStore>,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(
            &config.jwt_secret,
            Duration::from_secs(config.jwt_ttl_secs),
        ));
        let auth = Arc::new(AuthService::new(
            Arc::new(SqliteAdminRepository::new(pool.clone())),
            tokens,
        ));

        Self {
            items: Arc::new(SqliteItemRepository::new(pool.clone())),
            media: Arc::new(SqliteMediaRepository::new(pool.clone())),
            news: Arc::new(SqliteNewsRepository::new(pool.clone())),
            education: Arc::new(SqliteEducationRepository::new(pool.clone())),
            submissions: Arc::new(SqliteSubmissionRepository::new(pool.clone())),
            contact: Arc::new(SqliteContactRepository::new(pool.clone())),
            newsletter: Arc::new(SqliteNewsletterRepository::new(pool)),
            auth,
            cache,
            mailer,
            uploads,
            config,
        }
    }

    /// Drop cached reads made stale by a committed write. Failures are
    /// logged; the write itself already succeeded.
    pub fn invalidate(&self, patterns: &[&str]) {
        for pattern in patterns {
            match self.cache.invalidate(pattern) {
                Ok(removed) => debug!(pattern, removed, "Cache invalidated after write"),
                Err(e) => warn!(pattern, error = %e, "Cache invalidation failed"),
            }
        }
    }
}
