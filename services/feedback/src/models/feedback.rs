//! Feedback model and related functionality

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Feedback entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    pub id: i32,
    pub title: String,
    pub content: String,
    /// Owner reference, cascades away with the user row
    pub username: String,
}

/// New feedback creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedback {
    pub title: String,
    pub content: String,
    pub username: String,
}
