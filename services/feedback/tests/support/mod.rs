//! In-memory store implementations for router tests
//!
//! These enforce the same constraints as the SQL schema: unique username
//! and email, and feedback rows cascading away with their owner.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use common::error::{DatabaseError, DatabaseResult};
use feedback::models::{Feedback, NewFeedback, User};
use feedback::repositories::{FeedbackStore, UserStore};
use feedback::session::SessionStore;
use feedback::state::AppState;

/// Shared in-memory tables
#[derive(Default)]
pub struct MemoryDb {
    pub users: RwLock<HashMap<String, User>>,
    pub feedback: RwLock<Vec<Feedback>>,
    next_id: AtomicI32,
}

pub struct MemoryUserStore(Arc<MemoryDb>);

pub struct MemoryFeedbackStore(Arc<MemoryDb>);

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, username: &str) -> DatabaseResult<Option<User>> {
        Ok(self.0.users.read().unwrap().get(username).cloned())
    }

    async fn insert(&self, user: &User) -> DatabaseResult<()> {
        let mut users = self.0.users.write().unwrap();

        let duplicate = users.contains_key(&user.username)
            || users.values().any(|u| u.email == user.email);
        if duplicate {
            return Err(DatabaseError::UniqueViolation);
        }

        users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn delete(&self, username: &str) -> DatabaseResult<()> {
        self.0.users.write().unwrap().remove(username);

        // ON DELETE CASCADE
        self.0
            .feedback
            .write()
            .unwrap()
            .retain(|f| f.username != username);

        Ok(())
    }
}

#[async_trait]
impl FeedbackStore for MemoryFeedbackStore {
    async fn get(&self, id: i32) -> DatabaseResult<Option<Feedback>> {
        Ok(self
            .0
            .feedback
            .read()
            .unwrap()
            .iter()
            .find(|f| f.id == id)
            .cloned())
    }

    async fn list_for_user(&self, username: &str) -> DatabaseResult<Vec<Feedback>> {
        Ok(self
            .0
            .feedback
            .read()
            .unwrap()
            .iter()
            .filter(|f| f.username == username)
            .cloned()
            .collect())
    }

    async fn insert(&self, new_feedback: &NewFeedback) -> DatabaseResult<Feedback> {
        let id = self.0.next_id.fetch_add(1, Ordering::SeqCst) + 1;

        let feedback = Feedback {
            id,
            title: new_feedback.title.clone(),
            content: new_feedback.content.clone(),
            username: new_feedback.username.clone(),
        };
        self.0.feedback.write().unwrap().push(feedback.clone());

        Ok(feedback)
    }

    async fn update(&self, id: i32, title: &str, content: &str) -> DatabaseResult<()> {
        let mut rows = self.0.feedback.write().unwrap();

        if let Some(row) = rows.iter_mut().find(|f| f.id == id) {
            row.title = title.to_string();
            row.content = content.to_string();
        }

        Ok(())
    }

    async fn delete(&self, id: i32) -> DatabaseResult<()> {
        self.0.feedback.write().unwrap().retain(|f| f.id != id);
        Ok(())
    }
}

/// Application state wired to fresh in-memory stores
pub fn test_state() -> (AppState, Arc<MemoryDb>) {
    let db = Arc::new(MemoryDb::default());

    let state = AppState {
        users: Arc::new(MemoryUserStore(db.clone())),
        feedback: Arc::new(MemoryFeedbackStore(db.clone())),
        sessions: SessionStore::new(),
    };

    (state, db)
}
