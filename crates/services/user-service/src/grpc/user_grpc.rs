//! gRPC implementation for UserService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use domain::{format_timestamp, LoginUser, RegisterUser};

use super::interceptor::{context, observe};
use crate::service::UserService;
use proto::user::{
    user_service_server::UserService as UserServiceProto, LoginReply, LoginRequest,
    RegisterRequest, User as UserProto, UserIdRequest, UserReply,
};

/// gRPC service wrapper for UserService.
pub struct UserGrpcService {
    service: Arc<dyn UserService>,
}

impl UserGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl UserServiceProto for UserGrpcService {
    async fn find_by_id(
        &self,
        request: Request<UserIdRequest>,
    ) -> Result<Response<UserReply>, Status> {
        let ctx = context(&request)?;
        let req = request.into_inner();

        let user = observe("FindById", &ctx, self.service.find_by_id(&ctx, req.user_id)).await?;
        Ok(Response::new(reply("Found a user by its ID", &user)))
    }

    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<UserReply>, Status> {
        let ctx = context(&request)?;
        let req = request.into_inner();
        let input = RegisterUser {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        };

        let user = observe("Register", &ctx, self.service.register(&ctx, input)).await?;
        Ok(Response::new(reply("Created a user", &user)))
    }

    async fn delete_by_id(
        &self,
        request: Request<UserIdRequest>,
    ) -> Result<Response<UserReply>, Status> {
        let ctx = context(&request)?;
        let req = request.into_inner();

        let user = observe(
            "DeleteById",
            &ctx,
            self.service.soft_delete_by_id(&ctx, req.user_id),
        )
        .await?;
        Ok(Response::new(reply("Soft deleted a user by its ID", &user)))
    }

    async fn delete_permanently_by_id(
        &self,
        request: Request<UserIdRequest>,
    ) -> Result<Response<UserReply>, Status> {
        let ctx = context(&request)?;
        let req = request.into_inner();

        let user = observe(
            "DeletePermanentlyById",
            &ctx,
            self.service.permanently_delete_by_id(&ctx, req.user_id),
        )
        .await?;
        Ok(Response::new(reply("Deleted a user permanently by its ID", &user)))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginReply>, Status> {
        let ctx = context(&request)?;
        let req = request.into_inner();
        let input = LoginUser {
            email: req.email,
            password: req.password,
        };

        let token = observe("Login", &ctx, self.service.login(&ctx, input)).await?;
        Ok(Response::new(LoginReply {
            message: "Logged in".to_string(),
            token,
        }))
    }
}

fn reply(message: &str, user: &domain::User) -> UserReply {
    UserReply {
        message: message.to_string(),
        user: Some(user_to_proto(user)),
    }
}

/// Convert domain User to proto User (no password hash).
fn user_to_proto(user: &domain::User) -> UserProto {
    UserProto {
        id: user.id,
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        created_at: format_timestamp(&user.created_at),
        updated_at: format_timestamp(&user.updated_at),
        deleted_at: user.deleted_at.as_ref().map(format_timestamp),
    }
}
