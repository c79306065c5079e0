//! Feedback service routes
//!
//! Every handler follows the same shape: authorization check first, form
//! validation second, persistence last. Success redirects; failure
//! re-renders the form body with field-level errors.

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::error::{AppError, AppResult};
use crate::forms::{FeedbackForm, FormErrors, LoginForm, RegisterForm, render_form};
use crate::models::{Feedback, NewFeedback};
use crate::state::AppState;
use crate::{auth, session};

/// Create the router for the feedback service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/register", get(register_form).post(register_user))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .route("/users/:username", get(show_user))
        .route("/users/:username/delete", post(remove_user))
        .route(
            "/users/:username/feedback/new",
            get(new_feedback_form).post(create_feedback),
        )
        .route(
            "/feedback/:id/update",
            get(edit_feedback_form).post(update_feedback),
        )
        .route("/feedback/:id/delete", post(delete_feedback))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "feedback-service"
    }))
}

/// Redirect the root to the registration form
pub async fn home() -> Redirect {
    Redirect::to("/register")
}

/// Show the registration form
pub async fn register_form() -> Json<Value> {
    render_form(&RegisterForm::default(), &FormErrors::default())
}

/// Process the registration form
pub async fn register_user(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let mut errors = form.validate();
    if !errors.is_empty() {
        return Ok(render_form(&form, &errors).into_response());
    }

    let user = auth::register(
        &form.username,
        &form.password,
        &form.email,
        &form.first_name,
        &form.last_name,
    )
    .map_err(|e| {
        error!("Failed to hash password: {}", e);
        AppError::InternalServerError
    })?;

    match state.users.insert(&user).await {
        Ok(()) => {
            info!("Registered user: {}", user.username);

            let jar = session::set_session(jar, &state.sessions, &user.username);
            Ok((jar, Redirect::to(&format!("/users/{}", user.username))).into_response())
        }
        // The unique constraints reject the row at commit time; the form
        // cannot tell which of the two columns collided.
        Err(e) if e.is_unique_violation() => {
            errors.add("username", "Username taken. Please pick another one");
            errors.add(
                "email",
                "This email is being used by someone else. Please pick another one",
            );
            Ok(render_form(&form, &errors).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Show the login form, or redirect a logged-in user to their profile
pub async fn login_form(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(username) = session::session_username(&jar, &state.sessions) {
        return Redirect::to(&format!("/users/{}", username)).into_response();
    }

    render_form(&LoginForm::default(), &FormErrors::default()).into_response()
}

/// Process the login form
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if let Some(username) = session::session_username(&jar, &state.sessions) {
        return Ok(Redirect::to(&format!("/users/{}", username)).into_response());
    }

    let mut errors = form.validate();
    if !errors.is_empty() {
        return Ok(render_form(&form, &errors).into_response());
    }

    match auth::authenticate(state.users.as_ref(), &form.username, &form.password).await? {
        Some(user) => {
            info!("Logged in user: {}", user.username);

            let jar = session::set_session(jar, &state.sessions, &user.username);
            Ok((jar, Redirect::to(&format!("/users/{}", user.username))).into_response())
        }
        // Same text for an unknown username and a wrong password, so the
        // response does not leak which accounts exist.
        None => {
            errors.add("username", "Invalid username/password!");
            Ok(render_form(&form, &errors).into_response())
        }
    }
}

/// Clear the session and redirect to the login form
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    if session::session_username(&jar, &state.sessions).is_none() {
        return Err(AppError::Unauthorized);
    }

    let jar = session::clear_session(jar, &state.sessions);
    Ok((jar, Redirect::to("/login")))
}

/// Render a user's profile with their feedback
pub async fn show_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    jar: CookieJar,
) -> AppResult<Json<Value>> {
    require_owner(&jar, &state, &username)?;

    let user = state.users.get(&username).await?.ok_or(AppError::NotFound)?;
    let feedback = state.feedback.list_for_user(&username).await?;

    Ok(Json(json!({
        "user": user,
        "feedback": feedback,
    })))
}

/// Delete a user and their feedback, then clear the session
pub async fn remove_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    require_owner(&jar, &state, &username)?;

    state.users.delete(&username).await?;
    info!("Deleted user: {}", username);

    let jar = session::clear_session(jar, &state.sessions);
    Ok((jar, Redirect::to("/login")))
}

/// Show the add-feedback form
pub async fn new_feedback_form(
    State(state): State<AppState>,
    Path(username): Path<String>,
    jar: CookieJar,
) -> AppResult<Json<Value>> {
    require_owner(&jar, &state, &username)?;

    Ok(render_form(&FeedbackForm::default(), &FormErrors::default()))
}

/// Process the add-feedback form
pub async fn create_feedback(
    State(state): State<AppState>,
    Path(username): Path<String>,
    jar: CookieJar,
    Form(form): Form<FeedbackForm>,
) -> AppResult<Response> {
    require_owner(&jar, &state, &username)?;

    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(render_form(&form, &errors).into_response());
    }

    let new_feedback = NewFeedback {
        title: form.title,
        content: form.content,
        username,
    };
    let feedback = state.feedback.insert(&new_feedback).await?;

    Ok(Redirect::to(&format!("/users/{}", feedback.username)).into_response())
}

/// Show the edit-feedback form pre-filled with the stored row
pub async fn edit_feedback_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> AppResult<Json<Value>> {
    let feedback = load_owned_feedback(&state, &jar, id).await?;

    let form = FeedbackForm {
        title: feedback.title,
        content: feedback.content,
    };
    Ok(render_form(&form, &FormErrors::default()))
}

/// Process the edit-feedback form
pub async fn update_feedback(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
    Form(form): Form<FeedbackForm>,
) -> AppResult<Response> {
    let feedback = load_owned_feedback(&state, &jar, id).await?;

    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(render_form(&form, &errors).into_response());
    }

    state.feedback.update(id, &form.title, &form.content).await?;
    info!("Updated feedback: {}", id);

    Ok(Redirect::to(&format!("/users/{}", feedback.username)).into_response())
}

/// Delete a feedback row
pub async fn delete_feedback(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> AppResult<Redirect> {
    let feedback = load_owned_feedback(&state, &jar, id).await?;

    state.feedback.delete(id).await?;
    info!("Deleted feedback: {}", id);

    Ok(Redirect::to(&format!("/users/{}", feedback.username)))
}

/// Require that the session's username matches the addressed user
fn require_owner(jar: &CookieJar, state: &AppState, username: &str) -> Result<(), AppError> {
    match session::session_username(jar, &state.sessions) {
        Some(current) if current == username => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

/// Load a feedback row, requiring the session to belong to its owner
///
/// A missing session is rejected before the row is read; a missing row is
/// 404; a session that is not the row's owner is 401.
async fn load_owned_feedback(state: &AppState, jar: &CookieJar, id: i32) -> AppResult<Feedback> {
    let current =
        session::session_username(jar, &state.sessions).ok_or(AppError::Unauthorized)?;

    let feedback = state.feedback.get(id).await?.ok_or(AppError::NotFound)?;

    if feedback.username != current {
        return Err(AppError::Unauthorized);
    }

    Ok(feedback)
}
