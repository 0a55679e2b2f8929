//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult, OptionExt};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every call runs inside the caller's future; dropping that future
/// cancels an in-flight query.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return the store-generated id
    async fn add(&self, name: String) -> AppResult<i64>;

    /// Fetch exactly one user; `AppError::NotFound` when no row matches
    async fn get_by_id(&self, id: i64) -> AppResult<User>;

    /// Set the name of the user with `user.id`.
    ///
    /// Returns `false` with no error when no row has that id.
    async fn update(&self, user: &User) -> AppResult<bool>;

    /// Delete user by ID; deleting a missing id is a no-op
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn add(&self, name: String) -> AppResult<i64> {
        let active_model = ActiveModel {
            name: Set(name),
            ..Default::default()
        };

        let result = UserEntity::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        tracing::debug!(id = result.last_insert_id, "User inserted");
        Ok(result.last_insert_id)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or_not_found()?;

        Ok(User::from(model))
    }

    async fn update(&self, user: &User) -> AppResult<bool> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::Name, Expr::value(user.name.clone()))
            .filter(user::Column::Id.eq(user.id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            tracing::debug!(id, "Delete matched no user");
        }

        Ok(())
    }
}
