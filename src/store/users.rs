//! User collection operations

use std::sync::Arc;

use super::EventStore;
use crate::error::UserError;
use crate::types::{ProfileUpdate, User};

impl EventStore {
    pub fn get_user(&self, username: &str) -> Option<User> {
        self.read(|data| data.users.iter().find(|u| u.username == username).cloned())
    }

    pub fn user_exists(&self, username: &str) -> bool {
        self.read(|data| data.users.iter().any(|u| u.username == username))
    }

    /// Insert a user; usernames are unique, emails unique ignoring case
    pub fn insert_user(&self, user: User) -> Result<User, UserError> {
        self.mutate(|data| {
            if data.users.iter().any(|u| u.username == user.username) {
                return Err(UserError::UsernameTaken(user.username.clone()));
            }
            if data.users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
                return Err(UserError::EmailTaken(user.email.clone()));
            }
            Arc::make_mut(&mut data.users).push(user.clone());
            Ok(user)
        })
    }

    /// Apply a partial profile update
    pub fn update_user(&self, username: &str, update: ProfileUpdate) -> Result<User, UserError> {
        self.mutate(|data| {
            if let Some(email) = &update.email {
                let taken = data
                    .users
                    .iter()
                    .any(|u| u.username != username && u.email.eq_ignore_ascii_case(email));
                if taken {
                    return Err(UserError::EmailTaken(email.clone()));
                }
            }

            let user = Arc::make_mut(&mut data.users)
                .iter_mut()
                .find(|u| u.username == username)
                .ok_or_else(|| UserError::NotFound(username.to_string()))?;
            user.apply(update);
            Ok(user.clone())
        })
    }
}
