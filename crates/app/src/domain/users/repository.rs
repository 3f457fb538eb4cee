//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::users::records::{UserId, UserRecord};

const FIND_USER_BY_USERNAME_SQL: &str = include_str!("sql/find_user_by_username.sql");
const FIND_ACTIVE_USER_BY_ID_SQL: &str = include_str!("sql/find_active_user_by_id.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const UPDATE_USER_SQL: &str = include_str!("sql/update_user.sql");
const DEACTIVATE_USER_SQL: &str = include_str!("sql/deactivate_user.sql");
const UPDATE_PASSWORD_SQL: &str = include_str!("sql/update_password.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Looks a user up by name regardless of whether the account is active.
    pub(crate) async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_USER_BY_USERNAME_SQL)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn find_active_user_by_id(
        &self,
        id: UserId,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_ACTIVE_USER_BY_ID_SQL)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        email: Option<&str>,
        is_active: bool,
        created_by: Option<UserId>,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(username)
            .bind(password_hash)
            .bind(email)
            .bind(is_active)
            .bind(created_by.map(UserId::into_inner))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn update_user(
        &self,
        id: UserId,
        username: &str,
        email: Option<&str>,
        is_active: bool,
        updated_by: Option<UserId>,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_USER_SQL)
            .bind(id.into_inner())
            .bind(username)
            .bind(email)
            .bind(is_active)
            .bind(updated_by.map(UserId::into_inner))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn deactivate_user(
        &self,
        id: UserId,
        updated_by: Option<UserId>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DEACTIVATE_USER_SQL)
            .bind(id.into_inner())
            .bind(updated_by.map(UserId::into_inner))
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn update_password(
        &self,
        id: UserId,
        password_hash: &str,
        updated_by: Option<UserId>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PASSWORD_SQL)
            .bind(id.into_inner())
            .bind(password_hash)
            .bind(updated_by.map(UserId::into_inner))
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: UserId::new(row.try_get("id")?),
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            email: row.try_get("email")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            created_by: row.try_get::<Option<i64>, _>("created_by")?.map(UserId::new),
            updated_by: row.try_get::<Option<i64>, _>("updated_by")?.map(UserId::new),
        })
    }
}
