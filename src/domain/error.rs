use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid date of birth")]
    InvalidDateOfBirth,

    #[error("Email and username already exist")]
    BothTaken,

    #[error("Email already taken")]
    EmailTaken,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Existence check against the store failed
    #[error("User lookup failed: {0}")]
    Lookup(#[source] RepositoryError),

    /// Insert of the new account failed
    #[error("User insert failed: {0}")]
    Insert(#[source] RepositoryError),
}

impl DomainError {
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            DomainError::BothTaken | DomainError::EmailTaken | DomainError::UsernameTaken
        )
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A unique constraint rejected the write
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Store operation timed out")]
    Timeout,
}
