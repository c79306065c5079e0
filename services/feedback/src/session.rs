//! Cookie-backed session management
//!
//! The browser cookie carries only an opaque token; the token-to-username
//! mapping lives in an in-process store owned by the application state.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum_extra::extract::cookie::{Cookie, CookieJar};
use rand::{Rng, distributions::Alphanumeric};
use tracing::info;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

const TOKEN_LENGTH: usize = 32;

/// In-process session store mapping tokens to authenticated usernames
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, String>>>,
}

impl SessionStore {
    /// Create a new session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for a user and return its token
    pub fn create(&self, username: &str) -> String {
        info!("Creating session for user: {}", username);

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();

        self.sessions
            .write()
            .expect("session store lock poisoned")
            .insert(token.clone(), username.to_string());

        token
    }

    /// Resolve a token to its authenticated username
    pub fn username(&self, token: &str) -> Option<String> {
        self.sessions
            .read()
            .expect("session store lock poisoned")
            .get(token)
            .cloned()
    }

    /// Delete a session
    pub fn remove(&self, token: &str) {
        self.sessions
            .write()
            .expect("session store lock poisoned")
            .remove(token);
    }
}

/// Authenticated username for the request, if any
pub fn session_username(jar: &CookieJar, sessions: &SessionStore) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| sessions.username(cookie.value()))
}

/// Open a session for a user and set its cookie
pub fn set_session(jar: CookieJar, sessions: &SessionStore, username: &str) -> CookieJar {
    let token = sessions.create(username);

    jar.add(
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true),
    )
}

/// Close the request's session and clear its cookie
pub fn clear_session(jar: CookieJar, sessions: &SessionStore) -> CookieJar {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        sessions.remove(cookie.value());
    }

    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
