//! gRPC client for user-service, exposed to handlers as the gateway usecase.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tonic::metadata::MetadataValue;
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Status};
use tracing::debug;
use utoipa::ToSchema;

use common::{RequestContext, REQUEST_ID_METADATA_KEY};
use domain::{validate, LoginUser, RegisterUser, UserResponse};
use proto::user::{
    user_service_client::UserServiceClient as ProtoUserServiceClient, LoginRequest,
    RegisterRequest, UserIdRequest, UserReply,
};

use super::error::{GatewayError, GatewayErrorKind, GatewayResult};

#[cfg(test)]
use mockall::automock;

/// Token returned after a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed JWT
    pub token: String,
}

/// Operations the HTTP handlers call. Each forwards the request id upstream.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserServiceUsecase: Send + Sync {
    async fn find_user_by_id(&self, ctx: &RequestContext, user_id: i64)
        -> GatewayResult<UserResponse>;

    async fn delete_user_by_id(
        &self,
        ctx: &RequestContext,
        user_id: i64,
    ) -> GatewayResult<UserResponse>;

    async fn delete_user_permanently_by_id(
        &self,
        ctx: &RequestContext,
        user_id: i64,
    ) -> GatewayResult<UserResponse>;

    async fn register(&self, ctx: &RequestContext, input: RegisterUser)
        -> GatewayResult<UserResponse>;

    async fn login(&self, ctx: &RequestContext, input: LoginUser) -> GatewayResult<TokenResponse>;
}

/// gRPC client wrapper for user-service.
pub struct UserClient {
    client: ProtoUserServiceClient<Channel>,
}

impl UserClient {
    /// Prepare a channel to user-service. The connection is made on first use.
    pub fn connect_lazy(endpoint: &str) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to user-service at {}", endpoint);
        let channel = Endpoint::from_shared(endpoint.to_string())?.connect_lazy();
        Ok(Self {
            client: ProtoUserServiceClient::new(channel),
        })
    }
}

/// Wrap a message with the `request-id` call metadata.
fn outgoing<T>(ctx: &RequestContext, message: T) -> GatewayResult<Request<T>> {
    let value = MetadataValue::try_from(ctx.request_id().as_str())
        .map_err(|e| GatewayError::new(GatewayErrorKind::Unknown).with_cause(e))?;

    let mut request = Request::new(message);
    request.metadata_mut().insert(REQUEST_ID_METADATA_KEY, value);
    Ok(request)
}

fn upstream(ctx: &RequestContext, scope: &'static str, status: Status) -> GatewayError {
    tracing::warn!(
        request_id = %ctx.request_id(),
        scope,
        code = ?status.code(),
        message = status.message(),
        "User service call failed"
    );
    GatewayError::new(GatewayErrorKind::UpstreamCallFailed).with_cause(status)
}

fn rejected(ctx: &RequestContext, scope: &'static str, err: domain::DomainError) -> GatewayError {
    tracing::warn!(request_id = %ctx.request_id(), scope, error = %err, "Input rejected");
    GatewayError::new(GatewayErrorKind::ValidationFailed).with_cause(err)
}

/// Convert a proto reply to the user projection.
fn reply_to_user(reply: UserReply) -> GatewayResult<UserResponse> {
    let proto = reply.user.ok_or_else(|| {
        GatewayError::new(GatewayErrorKind::Unknown).with_cause("user-service reply has no user")
    })?;

    Ok(UserResponse {
        id: proto.id,
        email: proto.email,
        first_name: proto.first_name,
        last_name: proto.last_name,
        created_at: proto.created_at,
        updated_at: proto.updated_at,
        deleted_at: proto.deleted_at,
    })
}

fn id_request(ctx: &RequestContext, user_id: i64) -> GatewayResult<Request<UserIdRequest>> {
    outgoing(
        ctx,
        UserIdRequest {
            request_id: ctx.request_id().to_string(),
            user_id,
        },
    )
}

#[async_trait]
impl UserServiceUsecase for UserClient {
    async fn find_user_by_id(
        &self,
        ctx: &RequestContext,
        user_id: i64,
    ) -> GatewayResult<UserResponse> {
        let request = id_request(ctx, user_id)?;

        let mut client = self.client.clone();
        let response = client
            .find_by_id(request)
            .await
            .map_err(|s| upstream(ctx, "userServiceUsecase#findUserById", s))?;
        reply_to_user(response.into_inner())
    }

    async fn delete_user_by_id(
        &self,
        ctx: &RequestContext,
        user_id: i64,
    ) -> GatewayResult<UserResponse> {
        let request = id_request(ctx, user_id)?;

        let mut client = self.client.clone();
        let response = client
            .delete_by_id(request)
            .await
            .map_err(|s| upstream(ctx, "userServiceUsecase#deleteUserById", s))?;
        reply_to_user(response.into_inner())
    }

    async fn delete_user_permanently_by_id(
        &self,
        ctx: &RequestContext,
        user_id: i64,
    ) -> GatewayResult<UserResponse> {
        let request = id_request(ctx, user_id)?;

        let mut client = self.client.clone();
        let response = client
            .delete_permanently_by_id(request)
            .await
            .map_err(|s| upstream(ctx, "userServiceUsecase#deleteUserPermanentlyById", s))?;
        reply_to_user(response.into_inner())
    }

    async fn register(
        &self,
        ctx: &RequestContext,
        input: RegisterUser,
    ) -> GatewayResult<UserResponse> {
        const SCOPE: &str = "userServiceUsecase#register";
        validate(&input).map_err(|e| rejected(ctx, SCOPE, e))?;

        let request = outgoing(
            ctx,
            RegisterRequest {
                request_id: ctx.request_id().to_string(),
                email: input.email,
                password: input.password,
                first_name: input.first_name,
                last_name: input.last_name,
            },
        )?;

        let mut client = self.client.clone();
        let response = client
            .register(request)
            .await
            .map_err(|s| upstream(ctx, SCOPE, s))?;
        reply_to_user(response.into_inner())
    }

    async fn login(&self, ctx: &RequestContext, input: LoginUser) -> GatewayResult<TokenResponse> {
        const SCOPE: &str = "userServiceUsecase#login";
        validate(&input).map_err(|e| rejected(ctx, SCOPE, e))?;

        let request = outgoing(
            ctx,
            LoginRequest {
                request_id: ctx.request_id().to_string(),
                email: input.email,
                password: input.password,
            },
        )?;

        let mut client = self.client.clone();
        let response = client
            .login(request)
            .await
            .map_err(|s| upstream(ctx, SCOPE, s))?;
        Ok(TokenResponse {
            token: response.into_inner().token,
        })
    }
}
