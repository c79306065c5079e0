//! Form payloads and per-form validation
//!
//! Each form deserializes from an urlencoded body with absent fields
//! defaulting to empty strings, so a missing field fails `required`
//! validation instead of failing at the transport layer. Validation
//! accumulates field-level messages that are rendered inline with the
//! re-rendered form.

use std::collections::BTreeMap;

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::validation::{validate_email, validate_length, validate_required};

/// Field-level validation errors, ordered by field name
#[derive(Debug, Default, Serialize)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Render a form and its errors as the response body
pub fn render_form<F: Serialize>(form: &F, errors: &FormErrors) -> Json<Value> {
    Json(json!({
        "form": form,
        "errors": errors,
    }))
}

/// Registration form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        if let Err(e) = validate_required(&self.username, "Username") {
            errors.add("username", e);
        }
        if let Err(e) = validate_required(&self.email, "Email") {
            errors.add("email", e);
        } else if let Err(e) = validate_email(&self.email) {
            errors.add("email", e);
        }
        if let Err(e) = validate_required(&self.first_name, "First name") {
            errors.add("first_name", e);
        }
        if let Err(e) = validate_required(&self.last_name, "Last name") {
            errors.add("last_name", e);
        }
        if let Err(e) = validate_required(&self.password, "Password") {
            errors.add("password", e);
        }

        errors
    }
}

/// Login form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        if let Err(e) = validate_required(&self.username, "Username") {
            errors.add("username", e);
        } else if let Err(e) = validate_length(&self.username, "Username", 1, 55) {
            errors.add("username", e);
        }
        if let Err(e) = validate_required(&self.password, "Password") {
            errors.add("password", e);
        } else if let Err(e) = validate_length(&self.password, "Password", 6, 55) {
            errors.add("password", e);
        }

        errors
    }
}

/// Feedback create/edit form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackForm {
    pub title: String,
    pub content: String,
}

impl FeedbackForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        if let Err(e) = validate_required(&self.title, "Title") {
            errors.add("title", e);
        } else if let Err(e) = validate_length(&self.title, "Title", 1, 100) {
            errors.add("title", e);
        }
        if let Err(e) = validate_required(&self.content, "Content") {
            errors.add("content", e);
        }

        errors
    }
}
