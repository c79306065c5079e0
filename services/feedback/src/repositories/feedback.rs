//! Feedback repository for database operations

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::info;

use common::error::DatabaseResult;

use crate::models::{Feedback, NewFeedback};
use crate::repositories::FeedbackStore;

/// Feedback repository backed by PostgreSQL
#[derive(Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    /// Create a new feedback repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackStore for FeedbackRepository {
    async fn get(&self, id: i32) -> DatabaseResult<Option<Feedback>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, content, username
            FROM feedback
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let feedback = Feedback {
                    id: row.get("id"),
                    title: row.get("title"),
                    content: row.get("content"),
                    username: row.get("username"),
                };
                Ok(Some(feedback))
            }
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, username: &str) -> DatabaseResult<Vec<Feedback>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, username
            FROM feedback
            WHERE username = $1
            ORDER BY id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        let feedback = rows
            .into_iter()
            .map(|row| Feedback {
                id: row.get("id"),
                title: row.get("title"),
                content: row.get("content"),
                username: row.get("username"),
            })
            .collect();

        Ok(feedback)
    }

    async fn insert(&self, new_feedback: &NewFeedback) -> DatabaseResult<Feedback> {
        info!("Creating feedback for user: {}", new_feedback.username);

        let row = sqlx::query(
            r#"
            INSERT INTO feedback (title, content, username)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, username
            "#,
        )
        .bind(&new_feedback.title)
        .bind(&new_feedback.content)
        .bind(&new_feedback.username)
        .fetch_one(&self.pool)
        .await?;

        let feedback = Feedback {
            id: row.get("id"),
            title: row.get("title"),
            content: row.get("content"),
            username: row.get("username"),
        };

        Ok(feedback)
    }

    async fn update(&self, id: i32, title: &str, content: &str) -> DatabaseResult<()> {
        info!("Updating feedback: {}", id);

        sqlx::query("UPDATE feedback SET title = $1, content = $2 WHERE id = $3")
            .bind(title)
            .bind(content)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: i32) -> DatabaseResult<()> {
        info!("Deleting feedback: {}", id);

        sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
