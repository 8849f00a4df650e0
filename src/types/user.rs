//! User accounts and profiles

use serde::{Deserialize, Serialize};

use super::is_zero;

/// Placeholder for profile fields the user has not filled in
pub const INCOMPLETE: &str = "incomplete";

fn incomplete() -> String {
    INCOMPLETE.to_string()
}

/// Stored user record (includes the bcrypt hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default = "incomplete")]
    pub gender: String,
    #[serde(default = "incomplete")]
    pub backup_contact: String,
    #[serde(default = "incomplete")]
    pub address: String,
    #[serde(default = "incomplete")]
    pub description: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub created_at: u64,
}

impl User {
    /// New account with every optional profile field marked incomplete
    pub fn new(username: String, email: String, password_hash: String, created_at: u64) -> Self {
        Self {
            username,
            email,
            password_hash,
            gender: incomplete(),
            backup_contact: incomplete(),
            address: incomplete(),
            description: incomplete(),
            created_at,
        }
    }

    /// Public view without credentials
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            username: self.username.clone(),
            email: self.email.clone(),
            gender: self.gender.clone(),
            backup_contact: self.backup_contact.clone(),
            address: self.address.clone(),
            description: self.description.clone(),
        }
    }

    /// Apply the fields present in `update`
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(backup_contact) = update.backup_contact {
            self.backup_contact = backup_contact;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
    }
}

/// User data safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub gender: String,
    pub backup_contact: String,
    pub address: String,
    pub description: String,
}

/// Partial profile update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub backup_contact: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
