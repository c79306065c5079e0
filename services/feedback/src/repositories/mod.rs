//! Repositories for database operations
//!
//! The store traits are the persistence seam: route handlers only see
//! `get`/`insert`/`update`/`delete` operations over the two entities. Each
//! operation runs as its own single-statement transaction, so unique
//! constraint violations surface at commit time as
//! [`DatabaseError::UniqueViolation`](common::error::DatabaseError).

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{Feedback, NewFeedback, User};

pub mod feedback;
pub mod user;

pub use feedback::FeedbackRepository;
pub use user::UserRepository;

/// Persistence interface for user rows
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Get a user by primary key
    async fn get(&self, username: &str) -> DatabaseResult<Option<User>>;

    /// Insert a new user; a duplicate username or email is rejected by the
    /// database at commit time, never pre-checked
    async fn insert(&self, user: &User) -> DatabaseResult<()>;

    /// Delete a user; owned feedback rows cascade away
    async fn delete(&self, username: &str) -> DatabaseResult<()>;
}

/// Persistence interface for feedback rows
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Get a feedback row by primary key
    async fn get(&self, id: i32) -> DatabaseResult<Option<Feedback>>;

    /// List a user's feedback rows
    async fn list_for_user(&self, username: &str) -> DatabaseResult<Vec<Feedback>>;

    /// Insert a feedback row and return it with its assigned id
    async fn insert(&self, new_feedback: &NewFeedback) -> DatabaseResult<Feedback>;

    /// Update a feedback row's title and content
    async fn update(&self, id: i32, title: &str, content: &str) -> DatabaseResult<()>;

    /// Delete a feedback row
    async fn delete(&self, id: i32) -> DatabaseResult<()>;
}
