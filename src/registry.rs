//! Account registry
//!
//! Registration is a rule engine over [`RegistryPolicy`], not anything
//! security-grade: secrets are compared verbatim and never hashed.
//! Checks run in a fixed order and the first failure is the one
//! reported.
mod in_memory;

pub use self::in_memory::*;

use crate::auction::UserId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegError {
    #[error("username must be between {min} and {max} characters")]
    UsernameLength { min: usize, max: usize },
    #[error("username may only contain letters, digits and underscores")]
    UsernameFormat,
    #[error("email address is not valid")]
    EmailFormat,
    #[error("password is too short or too common")]
    WeakSecret,
    #[error("username already exists")]
    UsernameTaken,
    #[error("email already registered")]
    EmailTaken,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Deliberately opaque: never says whether the username or the
    /// secret was the part that failed.
    #[error("invalid username or password")]
    InvalidCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

/// Registration rules as data, so deployments can tune them without
/// touching the checks themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryPolicy {
    pub username_min_len: usize,
    pub username_max_len: usize,
    pub secret_min_len: usize,
    /// Matched case-insensitively against the whole secret.
    pub weak_secrets: Vec<String>,
}

impl Default for RegistryPolicy {
    fn default() -> Self {
        Self {
            username_min_len: 3,
            username_max_len: 20,
            secret_min_len: 6,
            weak_secrets: [
                "password", "123456", "12345678", "qwerty", "abc123", "letmein", "iloveyou",
                "admin",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl RegistryPolicy {
    pub fn check_username(&self, username: &str) -> Result<(), RegError> {
        let len = username.chars().count();
        if len < self.username_min_len || len > self.username_max_len {
            return Err(RegError::UsernameLength {
                min: self.username_min_len,
                max: self.username_max_len,
            });
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(RegError::UsernameFormat);
        }
        Ok(())
    }

    /// Exactly one `@`, with at least one `.` somewhere after it.
    pub fn check_email(&self, email: &str) -> Result<(), RegError> {
        let mut parts = email.splitn(2, '@');
        let local = parts.next().unwrap_or("");
        let domain = match parts.next() {
            Some(domain) => domain,
            None => return Err(RegError::EmailFormat),
        };
        if local.is_empty() || domain.contains('@') || !domain.contains('.') {
            return Err(RegError::EmailFormat);
        }
        Ok(())
    }

    pub fn check_secret(&self, secret: &str) -> Result<(), RegError> {
        if secret.chars().count() < self.secret_min_len {
            return Err(RegError::WeakSecret);
        }
        let lowered = secret.to_lowercase();
        if self.weak_secrets.iter().any(|weak| *weak == lowered) {
            return Err(RegError::WeakSecret);
        }
        Ok(())
    }
}

pub trait AccountRegistry: Send + Sync {
    /// Validate and add a new user. Checks run in order: username
    /// length, username format, email format, secret strength, then the
    /// case-insensitive uniqueness checks.
    fn register(&self, username: &str, email: &str, password: &str) -> Result<User, RegError>;

    /// Case-insensitive username match plus exact secret match.
    fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Resolve a user id, e.g. to confirm a bidder exists.
    fn lookup(&self, user_id: UserId) -> Option<User>;
}

pub type SharedAccountRegistry = Arc<dyn AccountRegistry>;
