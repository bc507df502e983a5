//! Liveness endpoint.

/// GET / — plain-text liveness banner.
pub async fn home() -> &'static str {
    "SEO Optimizer is running"
}
