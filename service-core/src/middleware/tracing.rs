use axum::http::{HeaderValue, Request};
use axum::{body::Body, extract::Request as AxumRequest, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Reuses the caller's `x-request-id` or mints one, and echoes it on the response.
pub async fn request_id_middleware(mut req: AxumRequest, next: Next) -> Response {
    let request_id = request_id(&req)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let header_value = HeaderValue::from_str(&request_id).ok();
    if let Some(value) = header_value.clone() {
        req.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let mut response = next.run(req).await;

    if let Some(value) = header_value {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Span factory for `TraceLayer::make_span_with`.
pub fn make_request_span(request: &Request<Body>) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        request_id = %request_id(request).unwrap_or("-"),
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
    )
}

fn request_id<B>(request: &Request<B>) -> Option<&str> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
}
