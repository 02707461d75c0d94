// Database repository for user records

use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::TableName;
use crate::users::models::{User, UserPatch};

/// Storage capability consumed by the user service
///
/// Every lookup is keyed by username.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create the users table if it does not exist yet
    ///
    /// `name` must be the table the repository itself reads and writes.
    async fn create_table(&self, name: &TableName) -> Result<(), sqlx::Error>;

    async fn check_exists(&self, username: &str) -> Result<bool, sqlx::Error>;

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;

    async fn new_user(&self, user: &User) -> Result<(), sqlx::Error>;

    /// Fails with `RowNotFound` when no row was deleted
    async fn delete_user(&self, username: &str) -> Result<(), sqlx::Error>;

    /// Writes name, last_name and email only
    async fn update_user(&self, username: &str, patch: &UserPatch) -> Result<(), sqlx::Error>;

    /// Writes the password column only
    async fn change_pwd(&self, password_hash: &str, username: &str) -> Result<(), sqlx::Error>;
}

/// PostgreSQL implementation of `UserRepository`
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
    table: TableName,
}

impl PgUserRepository {
    /// Create a new PgUserRepository over the given table
    pub fn new(pool: PgPool, table: TableName) -> Self {
        Self { pool, table }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_table(&self, name: &TableName) -> Result<(), sqlx::Error> {
        debug_assert_eq!(name, &self.table, "bootstrapped table differs from queried table");

        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {name} (
                id UUID PRIMARY KEY,
                name VARCHAR(64) NOT NULL,
                last_name VARCHAR(64) NOT NULL,
                username VARCHAR(64) UNIQUE NOT NULL,
                email VARCHAR(255) UNIQUE NOT NULL,
                password VARCHAR(255) NOT NULL
            )
            "#
        );

        sqlx::query(&query).execute(&self.pool).await?;

        tracing::info!("Table {} is ready", name);
        Ok(())
    }

    async fn check_exists(&self, username: &str) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE username = $1)",
            self.table
        );

        let exists: (bool,) = sqlx::query_as(&query)
            .bind(username)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists.0)
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT id, name, last_name, username, email, password FROM {} WHERE username = $1",
            self.table
        );

        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    async fn new_user(&self, user: &User) -> Result<(), sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO {} (id, name, last_name, username, email, password)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
            self.table
        );

        sqlx::query(&query)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.last_name)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_user(&self, username: &str) -> Result<(), sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE username = $1", self.table);

        let result = sqlx::query(&query)
            .bind(username)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    async fn update_user(&self, username: &str, patch: &UserPatch) -> Result<(), sqlx::Error> {
        let query = format!(
            "UPDATE {} SET name = $1, last_name = $2, email = $3 WHERE username = $4",
            self.table
        );

        let result = sqlx::query(&query)
            .bind(&patch.name)
            .bind(&patch.last_name)
            .bind(&patch.email)
            .bind(username)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    async fn change_pwd(&self, password_hash: &str, username: &str) -> Result<(), sqlx::Error> {
        let query = format!("UPDATE {} SET password = $1 WHERE username = $2", self.table);

        let result = sqlx::query(&query)
            .bind(password_hash)
            .bind(username)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }
}
