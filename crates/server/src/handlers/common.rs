//! Shared handler helpers: the cache-control policy and response builders.
//!
//! Every resolvable response carries a long-lived public cache header so a
//! fronting CDN can absorb repeat traffic. Everything else, misses and
//! unparsable paths alike, is a 404 that caches are told never to store.
//! A miss may become a hit the moment an upstream publishes the module, so
//! caching the 404 would pin the failure.

use axum::body::Body;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Cache-Control value forbidding any caching of the response.
pub const NO_STORE: &str = "must-revalidate, no-cache, no-store";

/// Cache-Control value for a resolvable response.
pub fn cache_value(max_age_secs: u64) -> String {
    format!("public, max-age={max_age_secs}")
}

/// A resolvable response: 200 with the public cache header.
pub fn cached(max_age_secs: u64, content_type: &'static str, body: impl Into<Body>) -> Response {
    (
        StatusCode::OK,
        [
            (CACHE_CONTROL, cache_value(max_age_secs)),
            (CONTENT_TYPE, content_type.to_string()),
        ],
        body.into(),
    )
        .into_response()
}

/// A miss: non-cacheable 404.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, [(CACHE_CONTROL, NO_STORE)], "not found").into_response()
}

/// A server-side failure: non-cacheable 500.
pub fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(CACHE_CONTROL, NO_STORE)],
        "internal server error",
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_value_formats_max_age() {
        assert_eq!(cache_value(86400), "public, max-age=86400");
        assert_eq!(cache_value(0), "public, max-age=0");
    }

    #[test]
    fn not_found_is_never_cacheable() {
        let response = not_found();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(CACHE_CONTROL).unwrap(),
            "must-revalidate, no-cache, no-store"
        );
    }

    #[test]
    fn cached_carries_public_header_and_content_type() {
        let response = cached(3600, "text/plain; charset=utf-8", "v1.0.0\n");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CACHE_CONTROL).unwrap(),
            "public, max-age=3600"
        );
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }
}
