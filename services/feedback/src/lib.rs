//! Feedback service
//!
//! User registration, session-cookie login, and feedback CRUD over
//! PostgreSQL.

pub mod auth;
pub mod error;
pub mod forms;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod state;
pub mod validation;
