use std::{future::Future, time::Duration};

use tracing::{error, info, warn};

use crate::domain::{
    error::{DomainError, RepositoryError},
    models::{
        credential::HashedPassword,
        outcome::RegistrationOutcome,
        registration::{RegistrationRequest, ValidatedRegistration},
        user::{StoredUser, UserIdentifier},
    },
    repositories::user_repository::UserRepository,
    services::{password_service::PasswordHasher, registration_validator::RegistrationValidator},
};

pub struct RegisterUserUsecase<R: UserRepository, P: PasswordHasher> {
    user_repository: R,
    password_hasher: P,
    validator: RegistrationValidator,
    store_timeout: Duration,
}

impl<R: UserRepository, P: PasswordHasher> RegisterUserUsecase<R, P>
where
    R: Send + Sync,
    P: Send + Sync + 'static,
{
    pub fn new(user_repository: R, password_hasher: P, store_timeout: Duration) -> Self {
        Self {
            user_repository,
            password_hasher,
            validator: RegistrationValidator::new(),
            store_timeout,
        }
    }

    /// Validate then register. No store access happens for a request that fails validation.
    pub async fn execute(&self, request: RegistrationRequest) -> RegistrationOutcome {
        match self.validator.validate(request) {
            Ok(registration) => self.register(registration).await,
            Err(e) => {
                warn!(error = %e, "registration rejected by validation");
                RegistrationOutcome::from(&e)
            }
        }
    }

    pub async fn register(&self, registration: ValidatedRegistration) -> RegistrationOutcome {
        let username = registration.username().to_string();
        let age = registration.age();

        match self.create_user(registration).await {
            Ok(user) => {
                info!(user_id = %user.id().as_uuid(), username = %user.username(), age, "user registered");
                RegistrationOutcome::Success
            }
            Err(e) if e.is_conflict() => {
                warn!(username = %username, error = %e, "registration conflict");
                RegistrationOutcome::from(&e)
            }
            Err(e) => {
                error!(username = %username, error = %e, "registration failed");
                RegistrationOutcome::from(&e)
            }
        }
    }

    async fn create_user(&self, registration: ValidatedRegistration) -> Result<StoredUser, DomainError> {
        self.ensure_available(registration.email(), registration.username())
            .await?;

        let password_hash = self.hash_password(registration.password()).await?;
        let user = StoredUser::new(registration, password_hash);

        match self.bounded(self.user_repository.insert(&user)).await {
            Ok(()) => Ok(user),
            // lost a race with a concurrent registration
            Err(RepositoryError::AlreadyExists(detail)) => {
                match self.ensure_available(user.email(), user.username()).await {
                    Err(conflict) if conflict.is_conflict() => Err(conflict),
                    _ => Err(DomainError::Insert(RepositoryError::AlreadyExists(detail))),
                }
            }
            Err(RepositoryError::Timeout) => {
                if self.was_committed(&user).await {
                    Ok(user)
                } else {
                    Err(DomainError::Insert(RepositoryError::Timeout))
                }
            }
            Err(e) => Err(DomainError::Insert(e)),
        }
    }

    /// An insert dropped by the timeout may still have reached the store.
    /// Its row is looked up by id; a failed lookup counts as not committed.
    async fn was_committed(&self, user: &StoredUser) -> bool {
        let committed = self
            .bounded(self.user_repository.exists(UserIdentifier::Id(*user.id())))
            .await;
        matches!(committed, Ok(true))
    }

    /// Fails with the conflict naming every taken field
    async fn ensure_available(&self, email: &str, username: &str) -> Result<(), DomainError> {
        let email_taken = self
            .bounded(self.user_repository.exists(UserIdentifier::Email(email)))
            .await
            .map_err(DomainError::Lookup)?;
        let username_taken = self
            .bounded(self.user_repository.exists(UserIdentifier::Username(username)))
            .await
            .map_err(DomainError::Lookup)?;

        match (email_taken, username_taken) {
            (true, true) => Err(DomainError::BothTaken),
            (true, false) => Err(DomainError::EmailTaken),
            (false, true) => Err(DomainError::UsernameTaken),
            (false, false) => Ok(()),
        }
    }

    /// Runs on the blocking pool so the work factor never stalls the runtime
    async fn hash_password(&self, password: &str) -> Result<HashedPassword, DomainError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::Hashing(e.to_string()))?
    }

    /// Cancels `operation` once the store timeout elapses. Cancelling does not
    /// roll back work the driver already handed to the database.
    async fn bounded<T, F>(&self, operation: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        tokio::time::timeout(self.store_timeout, operation)
            .await
            .map_err(|_| RepositoryError::Timeout)?
    }
}
