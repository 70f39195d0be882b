use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::user::{StoredUser, UserIdentifier},
};

/// Account store consumed by registration.
///
/// `insert` is the authoritative uniqueness guard: implementations must reject
/// a second account with the same email or username with
/// [`RepositoryError::AlreadyExists`], whatever `exists` reported earlier.
#[async_trait]
pub trait UserRepository {
    async fn exists(&self, identifier: UserIdentifier<'_>) -> Result<bool, RepositoryError>;
    async fn insert(&self, user: &StoredUser) -> Result<(), RepositoryError>;
}
