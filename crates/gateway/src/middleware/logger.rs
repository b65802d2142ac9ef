//! Request logging with response body capture.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::{to_bytes, Body},
    extract::{ConnectInfo, Request},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use common::RequestId;

/// Log every request once it has been answered, including the JSON body sent.
pub async fn log_request(
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    const SCOPE: &str = "middleware#logRequest";

    let started = Instant::now();
    let ip = get_client_ip(request.headers(), connect_info);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let (parts, body) = response.into_parts();

    let request_id = parts
        .extensions
        .get::<RequestId>()
        .map(ToString::to_string)
        .unwrap_or_default();

    let (body, captured) = if is_json(&parts.headers) {
        match to_bytes(body, usize::MAX).await {
            Ok(bytes) => {
                let captured = String::from_utf8_lossy(&bytes).into_owned();
                (Body::from(bytes), captured)
            }
            Err(e) => {
                tracing::error!(request_id, scope = SCOPE, error = %e, "Reading response body failed");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    } else {
        (body, String::new())
    };

    tracing::info!(
        request_id,
        scope = SCOPE,
        ip,
        method = %method,
        path,
        status_code = parts.status.as_u16(),
        latency = ?started.elapsed(),
        body = captured,
        "Handle user request"
    );

    Response::from_parts(parts, body)
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false)
}

fn get_client_ip(headers: &HeaderMap, connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    // Try X-Forwarded-For header first
    if let Some(forwarded) = headers.get("X-Forwarded-For").and_then(|h| h.to_str().ok()) {
        if let Some(ip) = forwarded.split(',').next() {
            return ip.trim().to_string();
        }
    }

    // Try X-Real-IP header
    if let Some(real_ip) = headers.get("X-Real-IP").and_then(|h| h.to_str().ok()) {
        return real_ip.to_string();
    }

    // Fall back to connection socket address
    connect_info
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Real-IP", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(get_client_ip(&headers, None), "10.0.0.2");

        headers.insert("X-Forwarded-For", HeaderValue::from_static("10.0.0.1, 10.0.0.9"));
        assert_eq!(get_client_ip(&headers, None), "10.0.0.1");

        let addr: SocketAddr = "192.168.1.5:4000".parse().unwrap();
        assert_eq!(get_client_ip(&HeaderMap::new(), Some(ConnectInfo(addr))), "192.168.1.5");
        assert_eq!(get_client_ip(&HeaderMap::new(), None), "unknown");
    }

    #[test]
    fn test_only_json_is_captured() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(is_json(&headers));
    }
}
