//! User registration, login and profile updates

use bcrypt::{hash, verify};
use serde::Deserialize;

use crate::error::UserError;
use crate::notify::NotificationSink;
use crate::store::EventStore;
use crate::types::{ProfileUpdate, User, UserProfile};

/// Registration input
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

fn validate(registration: &Registration) -> Result<(), UserError> {
    if registration.username.trim().is_empty() {
        return Err(UserError::Invalid("username is required".to_string()));
    }
    if !looks_like_email(&registration.email) {
        return Err(UserError::Invalid(format!("invalid email '{}'", registration.email)));
    }
    if registration.password.is_empty() {
        return Err(UserError::Invalid("password is required".to_string()));
    }
    Ok(())
}

fn looks_like_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

/// Create an account with a bcrypt hash of `password` and send a welcome
pub fn register(
    store: &EventStore,
    notifier: &NotificationSink,
    registration: Registration,
    password_cost: u32,
    created_at: u64,
) -> Result<UserProfile, UserError> {
    validate(&registration)?;

    let username = registration.username.trim().to_string();
    if store.user_exists(&username) {
        return Err(UserError::UsernameTaken(username));
    }

    let password_hash = hash(&registration.password, password_cost)?;
    let user = store.insert_user(User::new(
        username,
        registration.email.trim().to_string(),
        password_hash,
        created_at,
    ))?;
    tracing::info!(username = %user.username, "user registered");

    if let Err(e) = notifier.notify(&user.username, "Welcome! Your account has been created.") {
        tracing::error!(username = %user.username, error = %e, "failed to record welcome notification");
    }

    Ok(user.profile())
}

/// Verify credentials and return the profile
pub fn login(store: &EventStore, username: &str, password: &str) -> Result<UserProfile, UserError> {
    let user = store.get_user(username).ok_or(UserError::InvalidCredentials)?;
    if !verify(password, &user.password_hash)? {
        tracing::warn!(username, "failed login");
        return Err(UserError::InvalidCredentials);
    }
    Ok(user.profile())
}

pub fn get_profile(store: &EventStore, username: &str) -> Result<UserProfile, UserError> {
    store
        .get_user(username)
        .map(|u| u.profile())
        .ok_or_else(|| UserError::NotFound(username.to_string()))
}

pub fn update_profile(
    store: &EventStore,
    username: &str,
    update: ProfileUpdate,
) -> Result<UserProfile, UserError> {
    if let Some(email) = &update.email {
        if !looks_like_email(email) {
            return Err(UserError::Invalid(format!("invalid email '{email}'")));
        }
    }
    let user = store.update_user(username, update)?;
    tracing::info!(username, "profile updated");
    Ok(user.profile())
}
