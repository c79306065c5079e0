//! Password hashing and credential checks

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

use common::error::DatabaseResult;

use crate::models::User;
use crate::repositories::UserStore;

/// Hash a plaintext password into a salted PHC string
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against a stored hash
///
/// An unparsable hash counts as a mismatch.
pub fn verify_password(hash: &str, password: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Build a pending user row with a hashed password
pub fn register(
    username: &str,
    password: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> Result<User> {
    Ok(User {
        username: username.to_string(),
        password: hash_password(password)?,
        email: email.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    })
}

/// Look up a user and check their password
///
/// Returns `None` for an unknown username and for a hash mismatch alike, so
/// the caller cannot distinguish the two.
pub async fn authenticate(
    users: &dyn UserStore,
    username: &str,
    password: &str,
) -> DatabaseResult<Option<User>> {
    let Some(user) = users.get(username).await? else {
        return Ok(None);
    };

    if verify_password(&user.password, password) {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}
