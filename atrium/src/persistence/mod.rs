pub mod admins;
pub mod contact;
pub mod education;
pub mod items;
pub mod media;
pub mod news;
pub mod newsletter;
pub mod submissions;

pub use admins::SqliteAdminRepository;
pub use contact::SqliteContactRepository;
pub use education::SqliteEducationRepository;
pub use items::SqliteItemRepository;
pub use media::SqliteMediaRepository;
pub use news::SqliteNewsRepository;
pub use newsletter::SqliteNewsletterRepository;
pub use submissions::SqliteSubmissionRepository;

use shared::Error;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{error, info};

/// Open the pool and apply the embedded migrations.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // Every connection to `:memory:` is its own database; keep exactly one.
    let in_memory = database_url.contains(":memory:");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options.connect_with(options).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!(in_memory, "Database ready");

    Ok(pool)
}

pub(crate) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> Error {
    move |e| {
        error!(error = %e, "{}", context);
        Error::Database(e.to_string())
    }
}

pub(crate) fn total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    create_pool("sqlite::memory:").await.unwrap()
}
