//! Correlation id for every request.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};

use common::{RequestContext, RequestId, REQUEST_ID_HEADER};

/// Generate the request id, expose it to handlers and echo it on the response.
///
/// The id is also left in the response extensions for the request logger.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = RequestId::generate();
    request
        .extensions_mut()
        .insert(RequestContext::new(id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response.extensions_mut().insert(id);
    response
}
