use atrium::mail::{LogMailer, Mailer, SmtpMailer};
use atrium::persistence::create_pool;
use atrium::uploads::LocalUploadStore;
use axum::{ServiceExt, extract::Request};
use cache_engine::ResponseCache;
use server_http::{AppState, build_router};
use shared::config::Config;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Atrium HTTP Server...");

    // Load environment variables from .env file (if exists)
    match dotenvy::dotenv() {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    let config = Arc::new(Config::from_env());

    info!("Opening database...");
    ensure_database_dir(&config.database_url)?;
    let pool = create_pool(&config.database_url).await?;

    let cache = Arc::new(ResponseCache::with_max_entry_bytes(
        config.cache_max_entry_bytes,
    ));
    let sweepers = cache.start_sweepers();

    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => Arc::new(SmtpMailer::new(smtp)?),
        None => {
            warn!("ATRIUM_SMTP_HOST not set, contact notifications will only be logged");
            Arc::new(LogMailer)
        }
    };

    let uploads = Arc::new(
        LocalUploadStore::open(
            &config.upload_dir,
            &config.public_base_url,
            config.max_upload_bytes,
        )
        .await?,
    );

    let state = AppState::new(pool.clone(), config.clone(), cache, mailer, uploads);

    if state
        .auth
        .ensure_admin(&config.admin_username, &config.admin_password)
        .await?
    {
        info!("Default admin user created: {}", config.admin_username);
    } else {
        info!("Admin user already exists: {}", config.admin_username);
    }

    // Trailing slashes are trimmed before routing.
    let app = NormalizePathLayer::trim_trailing_slash().layer(build_router(state));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("HTTP Server listening on http://{}", address);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweepers.shutdown().await;
    pool.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// sqlite creates the database file but not its parent directory.
fn ensure_database_dir(database_url: &str) -> std::io::Result<()> {
    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or_default();

    if path.is_empty() || path.contains(":memory:") {
        return Ok(());
    }

    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    info!("Shutting down gracefully...");
}
