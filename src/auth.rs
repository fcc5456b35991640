// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;
use rand_core::OsRng;
use regex::Regex;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Role, User};
use crate::store::{self, KvStore};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("'{0}' does not look like an email address")]
    InvalidEmail(String),
    #[error("email '{0}' is already registered")]
    EmailTaken(String),
    #[error("email or password is incorrect")]
    InvalidCredentials,
    #[error("not logged in; run 'kasbook login' first")]
    NotLoggedIn,
}

pub fn find_user(store: &dyn KvStore, email: &str) -> Result<Option<User>> {
    let users = store::load_users(store)?;
    Ok(users.into_iter().find(|u| u.email == email))
}

/// Registers a new user and opens a session for them. Passwords are stored
/// as salted Argon2 hashes, never in a recoverable form.
pub fn register(store: &dyn KvStore, email: &str, name: &str, password: &str) -> Result<User> {
    if !EMAIL_RE.is_match(email) {
        return Err(AuthError::InvalidEmail(email.to_string()).into());
    }
    let mut users = store::load_users(store)?;
    if users.iter().any(|u| u.email == email) {
        return Err(AuthError::EmailTaken(email.to_string()).into());
    }
    let user = User {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        name: name.to_string(),
        password_hash: hash_password(password)?,
        role: Role::User,
    };
    users.push(user.clone());
    store::save_users(store, &users)?;
    store::save_session(store, &user)?;
    Ok(user)
}

/// Verifies credentials and persists the session record. Lookup failure and
/// verify failure are indistinguishable to the caller.
pub fn login(store: &dyn KvStore, email: &str, password: &str) -> Result<User> {
    let user = match find_user(store, email)? {
        Some(user) => user,
        None => return Err(AuthError::InvalidCredentials.into()),
    };
    if !verify_password(password, &user.password_hash) {
        return Err(AuthError::InvalidCredentials.into());
    }
    store::save_session(store, &user)?;
    Ok(user)
}

pub fn logout(store: &dyn KvStore) -> Result<()> {
    store::clear_session(store)
}

pub fn current_user(store: &dyn KvStore) -> Result<Option<User>> {
    store::load_session(store)
}

pub fn require_user(store: &dyn KvStore) -> Result<User> {
    current_user(store)?.ok_or_else(|| AuthError::NotLoggedIn.into())
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
