//! Feedback service models

pub mod feedback;
pub mod user;

// Re-export for convenience
pub use feedback::{Feedback, NewFeedback};
pub use user::User;
