//! User service - Handles user-related business logic.
//!
//! Every failure leaves this layer as a [`UsecaseError`]. Repository failures
//! are re-classified here and kept as the cause.

use async_trait::async_trait;
use std::sync::Arc;

use common::{report, RequestContext};
use domain::{validate, LoginUser, NewUser, Password, RegisterUser, User};

use super::error::{UsecaseError, UsecaseErrorKind, UsecaseResult};
use super::token::TokenIssuer;
use crate::repository::{RepositoryError, RepositoryErrorKind, UserRepository};

#[cfg(test)]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get active user by ID
    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> UsecaseResult<User>;

    /// Mark an active user as deleted
    async fn soft_delete_by_id(&self, ctx: &RequestContext, id: i64) -> UsecaseResult<User>;

    /// Remove a user for good, soft-deleted or not
    async fn permanently_delete_by_id(&self, ctx: &RequestContext, id: i64)
        -> UsecaseResult<User>;

    /// Validate, hash the password and store a new user
    async fn register(&self, ctx: &RequestContext, input: RegisterUser) -> UsecaseResult<User>;

    /// Check credentials and return a signed token
    async fn login(&self, ctx: &RequestContext, input: LoginUser) -> UsecaseResult<String>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    tokens: TokenIssuer,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>, tokens: TokenIssuer) -> Self {
        Self { repo, tokens }
    }
}

/// Re-classify a repository failure for this layer.
fn lift(err: RepositoryError) -> UsecaseError {
    let kind = match err.kind() {
        RepositoryErrorKind::UniqueViolation => UsecaseErrorKind::UserAlreadyExists,
        RepositoryErrorKind::NotFound => UsecaseErrorKind::UserNotFound,
        RepositoryErrorKind::Unknown => UsecaseErrorKind::Unknown,
    };
    UsecaseError::new(kind).with_cause(err)
}

/// Log a failure once, at the level its kind deserves.
fn logged(ctx: &RequestContext, scope: &'static str, err: UsecaseError) -> UsecaseError {
    match err.kind() {
        UsecaseErrorKind::PasswordHashingFailed
        | UsecaseErrorKind::TokenSigningFailed
        | UsecaseErrorKind::Unknown => {
            tracing::error!(request_id = %ctx.request_id(), scope, error = %report(&err), "Usecase failed");
        }
        _ => {
            tracing::warn!(request_id = %ctx.request_id(), scope, error = %report(&err), "Request rejected");
        }
    }
    err
}

#[async_trait]
impl UserService for UserManager {
    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> UsecaseResult<User> {
        self.repo
            .find_by_id(ctx, id)
            .await
            .map_err(|e| logged(ctx, "userUsecase#findById", lift(e)))
    }

    async fn soft_delete_by_id(&self, ctx: &RequestContext, id: i64) -> UsecaseResult<User> {
        self.repo
            .soft_delete_by_id(ctx, id)
            .await
            .map_err(|e| logged(ctx, "userUsecase#softDeleteById", lift(e)))
    }

    async fn permanently_delete_by_id(
        &self,
        ctx: &RequestContext,
        id: i64,
    ) -> UsecaseResult<User> {
        self.repo
            .permanently_delete_by_id(ctx, id)
            .await
            .map_err(|e| logged(ctx, "userUsecase#permanentlyDeleteById", lift(e)))
    }

    async fn register(&self, ctx: &RequestContext, input: RegisterUser) -> UsecaseResult<User> {
        const SCOPE: &str = "userUsecase#register";

        validate(&input).map_err(|e| {
            logged(
                ctx,
                SCOPE,
                UsecaseError::new(UsecaseErrorKind::ValidationFailed).with_cause(e),
            )
        })?;

        let password = Password::new(&input.password).map_err(|e| {
            logged(
                ctx,
                SCOPE,
                UsecaseError::new(UsecaseErrorKind::PasswordHashingFailed).with_cause(e),
            )
        })?;

        let new_user = NewUser {
            email: input.email,
            password_hash: password.into_string(),
            first_name: input.first_name,
            last_name: input.last_name,
        };

        let user = self
            .repo
            .create(ctx, new_user)
            .await
            .map_err(|e| logged(ctx, SCOPE, lift(e)))?;

        tracing::info!(request_id = %ctx.request_id(), scope = SCOPE, user_id = user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, ctx: &RequestContext, input: LoginUser) -> UsecaseResult<String> {
        const SCOPE: &str = "userUsecase#login";

        validate(&input).map_err(|e| {
            logged(
                ctx,
                SCOPE,
                UsecaseError::new(UsecaseErrorKind::ValidationFailed).with_cause(e),
            )
        })?;

        let user = match self.repo.find_by_email(ctx, &input.email).await {
            Ok(user) => user,
            Err(e) if e.is(RepositoryErrorKind::NotFound) => {
                Password::verify_dummy(&input.password);
                let err = UsecaseError::new(UsecaseErrorKind::InvalidCredentials).with_cause(lift(e));
                return Err(logged(ctx, SCOPE, err));
            }
            Err(e) => return Err(logged(ctx, SCOPE, lift(e))),
        };

        let stored = Password::from_hash(user.password_hash.as_str());
        if !stored.verify(&input.password) {
            return Err(logged(
                ctx,
                SCOPE,
                UsecaseError::new(UsecaseErrorKind::InvalidCredentials),
            ));
        }

        self.tokens.issue(&user).map_err(|e| {
            logged(
                ctx,
                SCOPE,
                UsecaseError::new(UsecaseErrorKind::TokenSigningFailed).with_cause(e),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::{find_kind, has_kind, JwtConfig, RequestId};
    use domain::DomainError;
    use tokio_test::{assert_err, assert_ok};

    use crate::repository::MockUserRepository;

    fn ctx() -> RequestContext {
        RequestContext::new(RequestId::generate())
    }

    fn create_test_user(id: i64, password_hash: &str) -> User {
        User {
            id,
            email: "a@b.com".to_string(),
            password_hash: password_hash.to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    fn tokens() -> TokenIssuer {
        TokenIssuer::new(
            "user-platform",
            &JwtConfig {
                secret: Some("s3cret".to_string()),
                expiration_hours: Some(1),
            },
        )
    }

    fn manager(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo), tokens())
    }

    fn register_input() -> RegisterUser {
        RegisterUser {
            email: "a@b.com".to_string(),
            password: "longenough".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
        }
    }

    fn login_input(password: &str) -> LoginUser {
        LoginUser {
            email: "a@b.com".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .withf(|_, id| *id == 7)
            .returning(|_, id| Ok(create_test_user(id, "hash")));

        let user = assert_ok!(manager(repo).find_by_id(&ctx(), 7).await);
        assert_eq!(user.id, 7);
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|_, _| Err(RepositoryError::new(RepositoryErrorKind::NotFound)));

        let err = assert_err!(manager(repo).find_by_id(&ctx(), 7).await);
        assert_eq!(err, UsecaseErrorKind::UserNotFound);
        assert!(has_kind(&err, RepositoryErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_soft_delete_of_deleted_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_soft_delete_by_id()
            .returning(|_, _| Err(RepositoryError::new(RepositoryErrorKind::NotFound)));

        let err = assert_err!(manager(repo).soft_delete_by_id(&ctx(), 3).await);
        assert_eq!(err.kind(), UsecaseErrorKind::UserNotFound);
    }

    #[tokio::test]
    async fn test_permanent_delete_store_failure_is_unknown() {
        let mut repo = MockUserRepository::new();
        repo.expect_permanently_delete_by_id().returning(|_, _| {
            Err(RepositoryError::new(RepositoryErrorKind::Unknown).with_cause("connection reset"))
        });

        let err = assert_err!(manager(repo).permanently_delete_by_id(&ctx(), 3).await);
        assert_eq!(err.kind(), UsecaseErrorKind::Unknown);
        assert!(report(&err).contains("connection reset"));
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|_, new_user| {
                new_user.email == "a@b.com"
                    && new_user.password_hash != "longenough"
                    && Password::from_hash(new_user.password_hash.as_str()).verify("longenough")
            })
            .times(1)
            .returning(|_, new_user| Ok(create_test_user(1, &new_user.password_hash)));

        let user = assert_ok!(manager(repo).register(&ctx(), register_input()).await);
        assert_eq!(user.id, 1);
        assert_ne!(user.password_hash, "longenough");
    }

    #[tokio::test]
    async fn test_register_validation_joins_messages() {
        let repo = MockUserRepository::new();
        let input = RegisterUser {
            email: "bad".to_string(),
            password: String::new(),
            ..register_input()
        };

        let err = assert_err!(manager(repo).register(&ctx(), input).await);
        assert_eq!(err.kind(), UsecaseErrorKind::ValidationFailed);
        assert_eq!(
            err.cause_message().as_deref(),
            Some("email format is wrong, password is required")
        );
        assert!(common::find_cause::<DomainError>(&err).is_some());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .returning(|_, _| Err(RepositoryError::new(RepositoryErrorKind::UniqueViolation)));

        let err = assert_err!(manager(repo).register(&ctx(), register_input()).await);
        assert_eq!(err.kind(), UsecaseErrorKind::UserAlreadyExists);
    }

    #[tokio::test]
    async fn test_login_success_returns_token() {
        let hash = Password::new("longenough").unwrap().into_string();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|_, email| email.to_string() == "a@b.com")
            .returning(move |_, _| Ok(create_test_user(1, &hash)));

        let token = assert_ok!(manager(repo).login(&ctx(), login_input("longenough")).await);
        assert_eq!(token.split('.').count(), 3);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let hash = Password::new("longenough").unwrap().into_string();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_, _| Ok(create_test_user(1, &hash)));

        let err = assert_err!(manager(repo).login(&ctx(), login_input("wrongpassword")).await);
        assert_eq!(err.kind(), UsecaseErrorKind::InvalidCredentials);
        assert!(!has_kind(&err, UsecaseErrorKind::UserNotFound));
    }

    #[tokio::test]
    async fn test_login_unknown_email_looks_like_wrong_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_, _| Err(RepositoryError::new(RepositoryErrorKind::NotFound)));

        let err = assert_err!(manager(repo).login(&ctx(), login_input("longenough")).await);
        assert_eq!(err.kind(), UsecaseErrorKind::InvalidCredentials);
        assert_eq!(err.to_string(), "invalid credentials");
        assert!(has_kind(&err, UsecaseErrorKind::UserNotFound));
        assert_eq!(find_kind::<RepositoryErrorKind>(&err), Some(RepositoryErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_login_without_signing_config() {
        let hash = Password::new("longenough").unwrap().into_string();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_, _| Ok(create_test_user(1, &hash)));

        let service = UserManager::new(
            Arc::new(repo),
            TokenIssuer::new("user-platform", &JwtConfig::default()),
        );
        let err = assert_err!(service.login(&ctx(), login_input("longenough")).await);
        assert_eq!(err.kind(), UsecaseErrorKind::TokenSigningFailed);
    }
}
