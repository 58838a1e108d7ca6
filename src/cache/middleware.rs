use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode, header},
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use tracing::debug;

use crate::cache::{Diag, PageCache};

/// State shared by the page cache middleware
#[derive(Clone)]
pub struct CacheState {
    pub pages: Arc<PageCache>,
    pub diag: Arc<Diag>,
}

/// Full request URI used as page cache key: scheme, host, path and query.
///
/// Server-side requests usually carry only path and query, the host then comes from the
/// `Host` header. Without any host the key is path and query alone.
pub fn request_key<B>(request: &Request<B>) -> String {
    let uri = request.uri();
    let path_and_query = uri.path_and_query().map_or(uri.path(), |pq| pq.as_str());

    let host = uri.authority().map(|a| a.as_str()).or_else(|| {
        request
            .headers()
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
    });

    match host {
        Some(host) => {
            let scheme = uri.scheme_str().unwrap_or("http");
            format!("{scheme}://{host}{path_and_query}")
        }
        None => path_and_query.to_string(),
    }
}

/// Serves GET requests from the page cache and caches successful responses.
///
/// Other methods pass through untouched, a hit never reaches the handler.
pub async fn reverse_cache(
    State(cache): State<CacheState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = request_key(&request);

    if let Some(html) = cache.pages.get(&key) {
        cache.diag.cache_hit();
        debug!(key = %key, outcome = "hit", "serving cached page");
        return Html(html).into_response();
    }

    cache.diag.cache_miss();
    debug!(key = %key, outcome = "miss", "rendering page");

    let response = next.run(request).await;
    if !response.status().is_success() {
        return response;
    }

    let (parts, body) = response.into_parts();
    // pages are cached whole, there is no size bound on an entry
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, key = %key, "failed to buffer response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match std::str::from_utf8(&bytes) {
        Ok(html) => cache.pages.set(key, html),
        Err(_) => debug!(key = %key, "response body is not text, not caching"),
    }

    Response::from_parts(parts, Body::from(bytes))
}
