//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::clients::TokenResponse;
use crate::response::{TokenEnvelope, UserEnvelope};
use domain::{LoginUser, RegisterUser, UserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::find_user_by_id,
        crate::handlers::user_handler::register,
        crate::handlers::user_handler::soft_delete_user,
        crate::handlers::user_handler::delete_user_permanently,
        crate::handlers::user_handler::login,
    ),
    components(
        schemas(
            RegisterUser,
            LoginUser,
            UserResponse,
            TokenResponse,
            UserEnvelope,
            TokenEnvelope,
        )
    ),
    tags(
        (name = "Authentication", description = "Login"),
        (name = "Users", description = "User management endpoints"),
    )
)]
pub struct ApiDoc;
