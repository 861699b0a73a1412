use crate::database::DbError;
use crate::database::app_user::{User, UserWithPassword};
use sqlx::{Executor, Postgres};

const USER_COLUMNS: &str = "id, email, name, created_at, updated_at";

pub struct UserStore;

impl UserStore {
    /// Creates a new user with an already-hashed password.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
        name: &str,
        hashed_password: &str,
    ) -> Result<User, DbError> {
        Ok(sqlx::query_as::<_, User>(&format!(
            "INSERT INTO app_user (email, name, password)
             VALUES ($1, $2, $3)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(name)
        .bind(hashed_password)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM app_user WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn find_by_email_with_password(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
    ) -> Result<Option<UserWithPassword>, DbError> {
        Ok(sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, email, name, password, created_at, updated_at
             FROM app_user WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn email_exists(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
    ) -> Result<bool, DbError> {
        Ok(
            sqlx::query_scalar::<_, i32>("SELECT 1 FROM app_user WHERE email = $1")
                .bind(email)
                .fetch_optional(executor)
                .await?
                .is_some(),
        )
    }
}
