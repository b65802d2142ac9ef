//! User handlers.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};

use domain::{LoginUser, RegisterUser, UserResponse};

use crate::clients::TokenResponse;
use crate::error::HandlerError;
use crate::extractors::{Ctx, UserIdPath, ValidatedJson};
use crate::handlers::no_route;
use crate::response::{StandardResponse, TokenEnvelope, UserEnvelope};
use crate::state::AppState;

type HandlerResult<T> = Result<StandardResponse<T>, HandlerError>;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register).fallback(no_route))
        .route(
            "/users/:user_id",
            get(find_user_by_id)
                .delete(delete_user_permanently)
                .fallback(no_route),
        )
        .route(
            "/users/:user_id/softdelete",
            post(soft_delete_user).fallback(no_route),
        )
        .route("/login", post(login).fallback(no_route))
}

/// Find an active user by ID
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "Users",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserEnvelope),
        (status = 400, description = "Bad params"),
        (status = 404, description = "User not found")
    )
)]
pub async fn find_user_by_id(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    UserIdPath(user_id): UserIdPath,
) -> HandlerResult<UserResponse> {
    let user = state.users.find_user_by_id(&ctx, user_id).await?;
    Ok(StandardResponse::ok(user))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User created", body = UserEnvelope),
        (status = 400, description = "Bad params or validation error"),
        (status = 409, description = "Email already been registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    ValidatedJson(input): ValidatedJson<RegisterUser>,
) -> HandlerResult<UserResponse> {
    let user = state.users.register(&ctx, input).await?;
    Ok(StandardResponse::created(user))
}

/// Soft delete an active user
#[utoipa::path(
    post,
    path = "/users/{user_id}/softdelete",
    tag = "Users",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User soft deleted", body = UserEnvelope),
        (status = 400, description = "Bad params"),
        (status = 404, description = "User not found or already deleted")
    )
)]
pub async fn soft_delete_user(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    UserIdPath(user_id): UserIdPath,
) -> HandlerResult<UserResponse> {
    let user = state.users.delete_user_by_id(&ctx, user_id).await?;
    Ok(StandardResponse::ok(user))
}

/// Permanently delete a user, soft deleted or not
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "Users",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User removed; the last state is returned", body = UserEnvelope),
        (status = 400, description = "Bad params"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user_permanently(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    UserIdPath(user_id): UserIdPath,
) -> HandlerResult<UserResponse> {
    let user = state.users.delete_user_permanently_by_id(&ctx, user_id).await?;
    Ok(StandardResponse::ok(user))
}

/// Exchange credentials for a token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Login successful", body = TokenEnvelope),
        (status = 400, description = "Bad params or validation error"),
        (status = 401, description = "Wrong email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    ValidatedJson(input): ValidatedJson<LoginUser>,
) -> HandlerResult<TokenResponse> {
    let token = state.users.login(&ctx, input).await?;
    Ok(StandardResponse::ok(token))
}
