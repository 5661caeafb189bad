//! Span helpers for outgoing API requests

/// Create a span for one request against the Ontbo API.
///
/// `route` is the path template (`/profiles/{profile_id}/facts`), never the
/// concrete path, so identifiers stay out of logs. Status and duration are
/// filled in later with [`record_status`] and [`record_duration`].
///
/// # Example
///
/// ```rust
/// use ontbo_observability::api_request_span;
///
/// let span = api_request_span!("GET", "/profiles");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! api_request_span {
    ($method:expr, $route:expr) => {
        tracing::debug_span!(
            "ontbo.request",
            http.method = $method,
            http.route = $route,
            http.status_code = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
        )
    };
}

/// Record an error on the current span and emit a warning event.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", tracing::field::display(error));
    tracing::warn!(error = %error, "Request failed");
}

/// Record the response status code on the current span.
pub fn record_status(status: u16) {
    tracing::Span::current().record("http.status_code", status);
}

/// Record latency on the current span, in milliseconds.
///
/// ```rust
/// use ontbo_observability::record_duration;
/// use std::time::Instant;
///
/// let start = Instant::now();
/// record_duration("duration_ms", start.elapsed());
/// ```
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
