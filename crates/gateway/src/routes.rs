//! Route configuration.

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{no_route, user_routes};
use crate::middleware::{cors, handle_errors, log_request, request_id};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
///
/// Middleware, outermost first: trace, request logging, error handling,
/// CORS, request id. Preflight requests stop at CORS and carry no request id.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(user_routes())
        .fallback(no_route)
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(cors))
        .layer(middleware::from_fn(handle_errors))
        .layer(middleware::from_fn(log_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tonic::Status;
    use tower::ServiceExt;

    use common::REQUEST_ID_HEADER;
    use domain::UserResponse;

    use super::*;
    use crate::clients::{GatewayError, GatewayErrorKind, MockUserServiceUsecase, TokenResponse};

    fn user(id: i64) -> UserResponse {
        UserResponse {
            id,
            email: "a@b.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            deleted_at: None,
        }
    }

    fn upstream(status: Status) -> GatewayError {
        GatewayError::new(GatewayErrorKind::UpstreamCallFailed).with_cause(status)
    }

    fn app(mock: MockUserServiceUsecase) -> Router {
        create_router(AppState::new(Arc::new(mock)))
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_find_user_envelope() {
        let mut mock = MockUserServiceUsecase::new();
        mock.expect_find_user_by_id()
            .withf(|_, id| *id == 7)
            .times(1)
            .returning(|_, id| Ok(user(id)));

        let response = send(app(mock), Method::GET, "/users/7", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        let body = json_body(response).await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["message"], "OK");
        assert_eq!(body["data"]["id"], 7);
        assert_eq!(body["data"]["email"], "a@b.com");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_params() {
        let mut mock = MockUserServiceUsecase::new();
        mock.expect_find_user_by_id().never();

        let response = send(app(mock), Method::GET, "/users/abc", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body, json!({"code": 400, "message": "Bad params", "data": null}));
    }

    #[tokio::test]
    async fn test_unreadable_json_is_bad_params() {
        let mock = MockUserServiceUsecase::new();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app(mock).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["message"], "Bad params");
    }

    #[tokio::test]
    async fn test_missing_fields_report_every_field() {
        let mut mock = MockUserServiceUsecase::new();
        mock.expect_register().never();

        let response = send(app(mock), Method::POST, "/users", Some(json!({}))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(
            body["message"],
            "email is required, password is required, first_name is required, last_name is required"
        );
        assert_eq!(body["data"], Value::Null);
    }

    #[tokio::test]
    async fn test_null_fields_are_reported_as_required() {
        let mut mock = MockUserServiceUsecase::new();
        mock.expect_register().never();

        let input = json!({
            "email": null,
            "password": "longenough",
            "first_name": "A",
            "last_name": "B"
        });
        let response = send(app(mock), Method::POST, "/users", Some(input)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["message"], "email is required");
    }

    #[tokio::test]
    async fn test_request_id_header_on_routed_responses() {
        let response = send(app(MockUserServiceUsecase::new()), Method::GET, "/nowhere", None).await;

        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_short_password_and_bad_email() {
        let mock = MockUserServiceUsecase::new();
        let input = json!({"email": "nope", "password": "short"});

        let response = send(app(mock), Method::POST, "/login", Some(input)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["message"],
            "email format is wrong, password minimum length is 8"
        );
    }

    #[tokio::test]
    async fn test_register_created_without_password() {
        let mut mock = MockUserServiceUsecase::new();
        mock.expect_register()
            .withf(|_, input| input.email == "a@b.com" && input.password == "longenough")
            .times(1)
            .returning(|_, _| Ok(user(1)));

        let input = json!({
            "email": "a@b.com",
            "password": "longenough",
            "first_name": "A",
            "last_name": "B"
        });
        let response = send(app(mock), Method::POST, "/users", Some(input)).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["code"], 201);
        assert_eq!(body["message"], "Created");
        assert_eq!(body["data"]["email"], "a@b.com");
        assert!(body["data"].get("password").is_none());
        assert!(body["data"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let mut mock = MockUserServiceUsecase::new();
        mock.expect_register()
            .returning(|_, _| Err(upstream(Status::already_exists("Email already been registered"))));

        let input = json!({
            "email": "a@b.com",
            "password": "longenough",
            "first_name": "A",
            "last_name": "B"
        });
        let response = send(app(mock), Method::POST, "/users", Some(input)).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            json_body(response).await,
            json!({"code": 409, "message": "Email already been registered", "data": null})
        );
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let mut mock = MockUserServiceUsecase::new();
        mock.expect_login().returning(|_, _| {
            Ok(TokenResponse {
                token: "signed.jwt.token".to_string(),
            })
        });

        let input = json!({"email": "a@b.com", "password": "longenough"});
        let response = send(app(mock), Method::POST, "/login", Some(input)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["token"], "signed.jwt.token");
    }

    #[tokio::test]
    async fn test_wrong_credentials_are_unauthorized() {
        let mut mock = MockUserServiceUsecase::new();
        mock.expect_login()
            .returning(|_, _| Err(upstream(Status::unauthenticated("Wrong email or password"))));

        let input = json!({"email": "a@b.com", "password": "longenough"});
        let response = send(app(mock), Method::POST, "/login", Some(input)).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["message"], "Wrong email or password");
    }

    #[tokio::test]
    async fn test_upstream_internal_is_hidden() {
        let mut mock = MockUserServiceUsecase::new();
        mock.expect_delete_user_permanently_by_id()
            .returning(|_, _| Err(upstream(Status::internal("Internal error"))));

        let response = send(app(mock), Method::DELETE, "/users/3", None).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({"code": 500, "message": "Internal Server Error", "data": null})
        );
    }

    #[tokio::test]
    async fn test_soft_delete_not_found() {
        let mut mock = MockUserServiceUsecase::new();
        mock.expect_delete_user_by_id()
            .withf(|_, id| *id == 9)
            .returning(|_, _| Err(upstream(Status::not_found("User not found"))));

        let response = send(app(mock), Method::POST, "/users/9/softdelete", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], "User not found");
    }

    #[tokio::test]
    async fn test_preflight_is_empty_no_content() {
        let response = send(app(MockUserServiceUsecase::new()), Method::OPTIONS, "/users", None).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "POST, OPTIONS, GET, PUT, DELETE"
        );
        assert!(!headers.contains_key(REQUEST_ID_HEADER));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let response = send(app(MockUserServiceUsecase::new()), Method::GET, "/nowhere", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            json_body(response).await,
            json!({"code": 404, "message": "Oops... nothing here", "data": null})
        );
    }

    #[tokio::test]
    async fn test_unsupported_method_is_not_found() {
        let response = send(app(MockUserServiceUsecase::new()), Method::PUT, "/users/1", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], "Oops... nothing here");
    }

    #[tokio::test]
    async fn test_request_ids_differ_per_request() {
        let mut mock = MockUserServiceUsecase::new();
        mock.expect_find_user_by_id().times(2).returning(|_, id| Ok(user(id)));
        let app = app(mock);

        let first = send(app.clone(), Method::GET, "/users/1", None).await;
        let second = send(app, Method::GET, "/users/1", None).await;

        assert_ne!(
            first.headers()[REQUEST_ID_HEADER],
            second.headers()[REQUEST_ID_HEADER]
        );
    }
}
