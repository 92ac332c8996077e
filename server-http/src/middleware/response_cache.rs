use axum::{
    body::{Body, HttpBody, to_bytes},
    extract::{FromRequestParts, RawPathParams, Request, State},
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use crate::errors::ApiError;
use cache_engine::{CachePolicy, CachedResponse, RequestDescriptor};
use shared::Error;
use tracing::{debug, warn};

pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

const HIT: HeaderValue = HeaderValue::from_static("HIT");
const MISS: HeaderValue = HeaderValue::from_static("MISS");
const BYPASS: HeaderValue = HeaderValue::from_static("BYPASS");

/// Memoize successful GET responses for anonymous callers.
///
/// Requests carrying `Authorization` (or using any other method) always run
/// the handler and never touch the cache. Only `200 OK` bodies are stored.
pub async fn cache_response(
    State(policy): State<CachePolicy>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET || request.headers().contains_key(header::AUTHORIZATION) {
        return tagged(next.run(request).await, BYPASS);
    }

    let (mut parts, body) = request.into_parts();
    let mut descriptor = RequestDescriptor::new(
        parts.method.as_str(),
        parts.uri.path(),
        parts.uri.query(),
    );
    if let Ok(params) = RawPathParams::from_request_parts(&mut parts, &()).await {
        descriptor = descriptor.with_params(params.iter());
    }
    let request = Request::from_parts(parts, body);

    let key = policy.key_for(&descriptor);

    if let Some(hit) = policy.lookup(&key) {
        debug!(key = %key, tier = policy.tier().as_str(), "Cache hit");
        return tagged(hit_response(hit), HIT);
    }

    // Taken before the handler reads, so a write that commits meanwhile
    // keeps this response out of the cache.
    let generation = policy.generation();
    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return tagged(response, MISS);
    }

    // Unknown or oversized bodies stream through untouched.
    let limit = policy.max_entry_bytes();
    match response.body().size_hint().upper() {
        Some(size) if size <= limit as u64 => {}
        _ => return tagged(response, MISS),
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to buffer response for caching");
            let error = ApiError::from(Error::Internal(format!("response body: {}", e)));
            return tagged(error.into_response(), MISS);
        }
    };

    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    policy.store_since(key, CachedResponse::new(bytes.clone(), content_type), generation);

    tagged(Response::from_parts(parts, Body::from(bytes)), MISS)
}

fn hit_response(hit: CachedResponse) -> Response {
    let mut response = Response::new(Body::from(hit.body));
    if let Some(value) = hit
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
    {
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    response
}

fn tagged(mut response: Response, state: HeaderValue) -> Response {
    response.headers_mut().insert(X_CACHE, state);
    response
}
