use crate::handlers::{
    self, auth, cache_admin, contact, education, get_involved, items, media, news, newsletter,
    uploads,
};
use crate::middleware::{cache_response, require_admin};
use crate::state::AppState;
use atrium::content::{MediaKind, NewsKind, SubmissionKind};
use atrium::uploads::PUBLIC_PREFIX;
use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    handler::Handler,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{MethodRouter, delete, get, patch, post, put},
};
use cache_engine::CachePolicy;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

// Multipart framing on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build and configure the application router
pub fn build_router(state: AppState) -> Router {
    let cache = &state.cache;
    let items_policy = cache.wrap(items::CACHE_TTL_SECS, None);
    let media_policy = cache.wrap(media::CACHE_TTL_SECS, None);
    let news_policy = cache.wrap(news::CACHE_TTL_SECS, None);
    let education_policy = cache.wrap(education::CACHE_TTL_SECS, None);

    let mut router = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Auth routes
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", admin(get(auth::me), &state))
        .route("/api/auth/logout", admin(post(auth::logout), &state))
        .route("/api/auth/password", admin(put(auth::change_password), &state))
        // Items
        .route(
            "/api/items",
            cached(items::list, &items_policy).merge(admin(post(items::create), &state)),
        )
        .route(
            "/api/items/{id}",
            cached(items::get, &items_policy)
                .merge(admin(put(items::update), &state))
                .merge(admin(delete(items::delete), &state)),
        )
        // Combined media listing
        .route("/api/media", cached(media::list_all, &media_policy))
        // Education
        .route(
            "/api/education",
            cached(education::list, &education_policy)
                .merge(admin(post(education::create), &state)),
        )
        .route(
            "/api/education/{id}",
            cached(education::get, &education_policy)
                .merge(admin(put(education::update), &state))
                .merge(admin(delete(education::delete), &state)),
        )
        // Get involved (admin review)
        .route("/api/get-involved", admin(get(get_involved::list), &state))
        .route(
            "/api/get-involved/entry/{id}",
            admin(get(get_involved::get), &state)
                .merge(admin(delete(get_involved::delete), &state)),
        )
        .route(
            "/api/get-involved/entry/{id}/status",
            admin(patch(get_involved::set_status), &state),
        )
        // Contact
        .route(
            "/api/contact",
            post(contact::submit).merge(admin(get(contact::list), &state)),
        )
        .route("/api/contact/{id}/read", admin(patch(contact::mark_read), &state))
        .route("/api/contact/{id}", admin(delete(contact::delete), &state))
        // Newsletter
        .route("/api/newsletter/subscribe", post(newsletter::subscribe))
        .route("/api/newsletter/unsubscribe", post(newsletter::unsubscribe))
        .route(
            "/api/newsletter/subscribers",
            admin(get(newsletter::list), &state),
        )
        // Uploads
        .route(
            "/api/uploads",
            admin(post(uploads::upload), &state).layer(DefaultBodyLimit::max(
                state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
            )),
        )
        .route("/api/uploads/{filename}", admin(delete(uploads::delete), &state))
        // Cache administration
        .route("/api/admin/cache/stats", admin(get(cache_admin::stats), &state))
        .route(
            "/api/admin/cache/invalidate",
            admin(post(cache_admin::invalidate), &state),
        )
        .route("/api/admin/cache", admin(delete(cache_admin::flush), &state));

    // One collection per media kind: /api/photos, /api/videos, ...
    for kind in MediaKind::ALL {
        let collection = format!("/api/{}", kind.collection());
        router = router
            .route(
                &collection,
                cached(media::list, &media_policy)
                    .merge(admin(post(media::create), &state))
                    .layer(Extension(kind)),
            )
            .route(
                &format!("{}/{{id}}", collection),
                cached(media::get, &media_policy)
                    .merge(admin(put(media::update), &state))
                    .merge(admin(delete(media::delete), &state))
                    .layer(Extension(kind)),
            );
    }

    for kind in [NewsKind::News, NewsKind::Event] {
        let collection = format!("/api/{}", kind.collection());
        router = router
            .route(
                &collection,
                cached(news::list, &news_policy)
                    .merge(admin(post(news::create), &state))
                    .layer(Extension(kind)),
            )
            .route(
                &format!("{}/{{id}}", collection),
                cached(news::get, &news_policy)
                    .merge(admin(put(news::update), &state))
                    .merge(admin(delete(news::delete), &state))
                    .layer(Extension(kind)),
            );
    }

    for kind in SubmissionKind::ALL {
        router = router.route(
            &format!("/api/get-involved/{}", kind.collection()),
            post(get_involved::submit).layer(Extension(kind)),
        );
    }

    router
        .nest_service(PUBLIC_PREFIX, ServeDir::new(&state.config.upload_dir))
        // Middleware
        .layer(cors_layer(&state.config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Public GET route whose successful responses are memoized under `policy`.
fn cached<H, T>(handler: H, policy: &CachePolicy) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).route_layer(middleware::from_fn_with_state(
        policy.clone(),
        cache_response,
    ))
}

/// Restrict a method router to authenticated admins.
fn admin(route: MethodRouter<AppState>, state: &AppState) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let base = CorsLayer::new()
        .allow_methods(methods)
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if allowed_origins.iter().any(|o| o == "*") {
        return base.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(origins))
}
