//! User repository implementation with soft delete support.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sqlx::{self, error::ErrorKind as SqlxErrorKind};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, NotSet,
    QueryFilter, RuntimeErr, Set, SqlErr, Statement, Value,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::error::{RepositoryError, RepositoryErrorKind, RepositoryResult};
use common::RequestContext;
use domain::{NewUser, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const SOFT_DELETE_SQL: &str = r#"UPDATE users SET deleted_at = $1, updated_at = $1
WHERE id = $2 AND deleted_at IS NULL
RETURNING id, email, password_hash, first_name, last_name, created_at, updated_at, deleted_at"#;

const PERMANENT_DELETE_SQL: &str = r#"DELETE FROM users WHERE id = $1
RETURNING id, email, password_hash, first_name, last_name, created_at, updated_at, deleted_at"#;

/// User repository trait for dependency injection.
///
/// Every lookup excludes soft-deleted records except the permanent delete,
/// which removes the row whatever its state.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find active user by ID
    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> RepositoryResult<User>;

    /// Find active user by email address
    async fn find_by_email(&self, ctx: &RequestContext, email: &str) -> RepositoryResult<User>;

    /// Insert a new user
    async fn create(&self, ctx: &RequestContext, new_user: NewUser) -> RepositoryResult<User>;

    /// Set the delete marker on an active user and return the updated row
    async fn soft_delete_by_id(&self, ctx: &RequestContext, id: i64) -> RepositoryResult<User>;

    /// Remove the row and return its last state
    async fn permanently_delete_by_id(
        &self,
        ctx: &RequestContext,
        id: i64,
    ) -> RepositoryResult<User>;
}

/// Concrete implementation of UserRepository backed by PostgreSQL
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Turn a query outcome into a user or a classified failure, logging the
/// failures that are not plain misses.
fn settle(
    ctx: &RequestContext,
    scope: &'static str,
    result: Result<Option<user::Model>, DbErr>,
) -> RepositoryResult<User> {
    match result {
        Ok(Some(model)) => Ok(User::from(model)),
        Ok(None) => Err(RepositoryError::new(RepositoryErrorKind::NotFound)),
        Err(err) => {
            let classified = classify(err);
            tracing::error!(
                request_id = %ctx.request_id(),
                scope,
                error = %common::report(&classified),
                "Query failed"
            );
            Err(classified)
        }
    }
}

/// Map a store failure onto the repository taxonomy, keeping the cause.
pub(crate) fn classify(err: DbErr) -> RepositoryError {
    let kind = if is_unique_violation(&err) {
        RepositoryErrorKind::UniqueViolation
    } else {
        RepositoryErrorKind::Unknown
    };
    RepositoryError::new(kind).with_cause(err)
}

fn is_unique_violation(err: &DbErr) -> bool {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return true;
    }
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(db_err)))
        | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(db_err))) => {
            matches!(db_err.kind(), SqlxErrorKind::UniqueViolation)
        }
        _ => false,
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> RepositoryResult<User> {
        let result = UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await;

        settle(ctx, "userRepository#findById", result)
    }

    async fn find_by_email(&self, ctx: &RequestContext, email: &str) -> RepositoryResult<User> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await;

        settle(ctx, "userRepository#findByEmail", result)
    }

    async fn create(&self, ctx: &RequestContext, new_user: NewUser) -> RepositoryResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let result = active_model.insert(&self.db).await.map(Some);
        settle(ctx, "userRepository#create", result)
    }

    async fn soft_delete_by_id(&self, ctx: &RequestContext, id: i64) -> RepositoryResult<User> {
        let statement = Statement::from_sql_and_values(
            DbBackend::Postgres,
            SOFT_DELETE_SQL,
            [Value::from(Utc::now()), Value::from(id)],
        );
        let result = UserEntity::find()
            .from_raw_sql(statement)
            .one(&self.db)
            .await;

        settle(ctx, "userRepository#softDeleteById", result)
    }

    async fn permanently_delete_by_id(
        &self,
        ctx: &RequestContext,
        id: i64,
    ) -> RepositoryResult<User> {
        let statement =
            Statement::from_sql_and_values(DbBackend::Postgres, PERMANENT_DELETE_SQL, [Value::from(id)]);
        let result = UserEntity::find()
            .from_raw_sql(statement)
            .one(&self.db)
            .await;

        settle(ctx, "userRepository#permanentlyDeleteById", result)
    }
}
