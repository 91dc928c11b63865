use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

/// Path prefixes served by the Swagger UI, which needs inline scripts and framing.
const DOCS_PREFIXES: [&str; 2] = ["/docs", "/.well-known/openapi.json"];

const DOCS_CSP: &str = "default-src 'self'; script-src 'self' 'unsafe-inline'; \
     style-src 'self' 'unsafe-inline'; img-src 'self' data:; font-src 'self'; connect-src 'self'";
const API_CSP: &str = "default-src 'none'; frame-ancestors 'none'";

pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let is_docs = DOCS_PREFIXES
        .iter()
        .any(|prefix| req.uri().path().starts_with(prefix));

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );

    let (csp, frame_options) = if is_docs {
        (DOCS_CSP, "SAMEORIGIN")
    } else {
        (API_CSP, "DENY")
    };
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(csp),
    );
    headers.insert(
        header::X_FRAME_OPTIONS,
        HeaderValue::from_static(frame_options),
    );

    response
}
