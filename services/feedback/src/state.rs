//! Application state shared across handlers

use std::sync::Arc;

use crate::repositories::{FeedbackStore, UserStore};
use crate::session::SessionStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub feedback: Arc<dyn FeedbackStore>,
    pub sessions: SessionStore,
}
