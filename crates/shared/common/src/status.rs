//! gRPC status to HTTP status translation.

use axum::http::StatusCode;
use tonic::Code;

/// HTTP status for an upstream gRPC code. Anything not listed is a 500.
pub fn http_status(code: Code) -> StatusCode {
    match code {
        Code::InvalidArgument => StatusCode::BAD_REQUEST,
        Code::Unauthenticated => StatusCode::UNAUTHORIZED,
        Code::PermissionDenied => StatusCode::FORBIDDEN,
        Code::NotFound => StatusCode::NOT_FOUND,
        Code::AlreadyExists => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Whether the upstream message may be shown to an HTTP caller as-is.
pub fn is_client_facing(code: Code) -> bool {
    http_status(code).is_client_error()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_codes() {
        assert_eq!(http_status(Code::InvalidArgument), StatusCode::BAD_REQUEST);
        assert_eq!(http_status(Code::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(http_status(Code::PermissionDenied), StatusCode::FORBIDDEN);
        assert_eq!(http_status(Code::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(http_status(Code::AlreadyExists), StatusCode::CONFLICT);
    }

    #[test]
    fn test_everything_else_is_internal() {
        for code in [Code::Unknown, Code::Internal, Code::Unavailable, Code::Ok, Code::DeadlineExceeded] {
            assert_eq!(http_status(code), StatusCode::INTERNAL_SERVER_ERROR);
            assert!(!is_client_facing(code));
        }
        assert!(is_client_facing(Code::NotFound));
    }
}
