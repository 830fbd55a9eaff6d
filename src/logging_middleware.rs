// src/logging_middleware.rs
//! Middleware for logging request and response bodies in debug mode

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use axum::body::to_bytes;
use tracing::debug;

/// Bodies with these content types are JSON-ish and safe to echo into logs.
/// Everything else (multipart uploads, PDF downloads) is skipped.
fn is_loggable(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/json") || ct.starts_with("text/"))
        .unwrap_or(false)
}

/// Middleware to log request and response bodies in debug mode.
/// The two directions are gated separately: a binary upload still gets its
/// JSON response logged, and vice versa.
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    let request = if is_loggable(request.headers()) {
        let (parts, body) = request.into_parts();

        // Read request body
        let bytes = to_bytes(body, usize::MAX)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        // Log request body if not empty
        if !bytes.is_empty() {
            if let Ok(body_str) = std::str::from_utf8(&bytes) {
                // Try to parse as JSON for pretty printing
                if let Ok(json) = serde_json::from_str::<serde_json::Value>(body_str) {
                    debug!(
                        method = %parts.method,
                        uri = %parts.uri,
                        request_body = %serde_json::to_string_pretty(&json).unwrap_or_else(|_| body_str.to_string()),
                        "📥 Request"
                    );
                } else {
                    debug!(
                        method = %parts.method,
                        uri = %parts.uri,
                        request_body = %body_str,
                        "📥 Request"
                    );
                }
            }
        }

        // Reconstruct request
        Request::from_parts(parts, Body::from(bytes))
    } else {
        request
    };

    // Call next middleware/handler
    let response = next.run(request).await;

    if !is_loggable(response.headers()) {
        return Ok(response);
    }

    // Extract response parts
    let (parts, body) = response.into_parts();

    // Read response body
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    // Log response body if not empty
    if !bytes.is_empty() {
        if let Ok(body_str) = std::str::from_utf8(&bytes) {
            // Try to parse as JSON for pretty printing
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(body_str) {
                debug!(
                    status = %parts.status,
                    response_body = %serde_json::to_string_pretty(&json).unwrap_or_else(|_| body_str.to_string()),
                    "📤 Response"
                );
            } else {
                debug!(
                    status = %parts.status,
                    response_body = %body_str,
                    "📤 Response"
                );
            }
        }
    }

    // Reconstruct response
    let response = Response::from_parts(parts, Body::from(bytes));

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_content_type(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_json_and_text_bodies_are_loggable() {
        assert!(is_loggable(&headers_with_content_type("application/json")));
        assert!(is_loggable(&headers_with_content_type(
            "application/json; charset=utf-8"
        )));
        assert!(is_loggable(&headers_with_content_type("text/plain")));
    }

    #[test]
    fn test_binary_bodies_are_not_loggable() {
        assert!(!is_loggable(&headers_with_content_type("application/pdf")));
        assert!(!is_loggable(&headers_with_content_type(
            "multipart/form-data; boundary=x"
        )));
    }

    #[test]
    fn test_missing_content_type_is_not_loggable() {
        // A bare GET has no content type; its response still gets logged
        // because each direction is gated on its own headers.
        assert!(!is_loggable(&HeaderMap::new()));
    }
}
