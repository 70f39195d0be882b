use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::{credential::HashedPassword, registration::ValidatedRegistration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserId(Uuid);
impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// Optional profile fields carried alongside the identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
}

/// Key used to look an account up in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserIdentifier<'a> {
    Id(UserId),
    Email(&'a str),
    Username(&'a str),
}

/// The persisted account record. Never holds a plaintext password.
#[derive(Debug, Clone)]
pub struct StoredUser {
    id: UserId,
    email: String,
    username: String,
    password_hash: HashedPassword,
    dob: String,
    profile: Profile,
    created_at: DateTime<Utc>,
}

impl StoredUser {
    /// Consume a validated registration, dropping its plaintext password in favour of `password_hash`
    pub fn new(registration: ValidatedRegistration, password_hash: HashedPassword) -> Self {
        Self {
            id: UserId::new(),
            email: registration.email().to_string(),
            username: registration.username().to_string(),
            password_hash,
            dob: registration.dob().to_string(),
            profile: registration.profile().clone(),
            created_at: Utc::now(),
        }
    }

    // getterのみ提供
    pub fn id(&self) -> &UserId {
        &self.id
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }
    pub fn dob(&self) -> &str {
        &self.dob
    }
    pub fn profile(&self) -> &Profile {
        &self.profile
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
