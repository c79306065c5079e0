//! User repository for database operations

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::info;

use common::error::DatabaseResult;

use crate::models::User;
use crate::repositories::UserStore;

/// User repository backed by PostgreSQL
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn get(&self, username: &str) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT username, password, email, first_name, last_name
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let user = User {
                    username: row.get("username"),
                    password: row.get("password"),
                    email: row.get("email"),
                    first_name: row.get("first_name"),
                    last_name: row.get("last_name"),
                };
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, user: &User) -> DatabaseResult<()> {
        info!("Creating new user: {}", user.username);

        sqlx::query(
            r#"
            INSERT INTO users (username, password, email, first_name, last_name)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, username: &str) -> DatabaseResult<()> {
        info!("Deleting user: {}", username);

        sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
