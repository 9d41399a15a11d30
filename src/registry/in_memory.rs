use super::*;
use crate::auction::UserId;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// In-memory account registry.
///
/// One lock over the whole user table: a registration holds the write
/// lock across both uniqueness checks and the insert, so two concurrent
/// registrations can never both claim the same username or email.
pub struct InMemoryAccountRegistry {
    policy: RegistryPolicy,
    users: RwLock<Vec<User>>,
}

impl InMemoryAccountRegistry {
    pub fn new(policy: RegistryPolicy) -> Self {
        Self {
            policy,
            users: RwLock::new(vec![]),
        }
    }

    pub fn new_shared(policy: RegistryPolicy) -> SharedAccountRegistry {
        Arc::new(Self::new(policy))
    }

    /// Seed the table, e.g. from a persisted snapshot. Ids are taken
    /// as-is; new registrations continue above the highest one.
    pub fn restore(policy: RegistryPolicy, users: Vec<User>) -> Self {
        Self {
            policy,
            users: RwLock::new(users),
        }
    }

    pub fn dump(&self) -> Vec<User> {
        self.users.read().clone()
    }
}

impl AccountRegistry for InMemoryAccountRegistry {
    fn register(&self, username: &str, email: &str, password: &str) -> Result<User, RegError> {
        self.policy.check_username(username)?;
        self.policy.check_email(email)?;
        self.policy.check_secret(password)?;

        let mut users = self.users.write();

        if users
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(username))
        {
            return Err(RegError::UsernameTaken);
        }
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(RegError::EmailTaken);
        }

        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            username: username.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            is_admin: false,
        };
        users.push(user.clone());
        info!(user_id = id, username, "registered new user");
        Ok(user)
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        self.users
            .read()
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username) && u.password == password)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)
    }

    fn lookup(&self, user_id: UserId) -> Option<User> {
        self.users.read().iter().find(|u| u.id == user_id).cloned()
    }
}
