use crate::domain::error::DomainError;

/// Which store call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceStage {
    Lookup,
    Insert,
}

/// Terminal result of a single registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Success,
    InvalidEmail,
    InvalidDateOfBirth,
    EmailTaken,
    UsernameTaken,
    BothTaken,
    HashingFailure,
    PersistenceFailure(PersistenceStage),
}

impl RegistrationOutcome {
    #[cfg(test)]
    pub fn is_success(&self) -> bool {
        matches!(self, RegistrationOutcome::Success)
    }
}

impl From<&DomainError> for RegistrationOutcome {
    fn from(error: &DomainError) -> Self {
        match error {
            DomainError::InvalidEmail => Self::InvalidEmail,
            DomainError::InvalidDateOfBirth => Self::InvalidDateOfBirth,
            DomainError::BothTaken => Self::BothTaken,
            DomainError::EmailTaken => Self::EmailTaken,
            DomainError::UsernameTaken => Self::UsernameTaken,
            DomainError::Hashing(_) => Self::HashingFailure,
            DomainError::Lookup(_) => Self::PersistenceFailure(PersistenceStage::Lookup),
            DomainError::Insert(_) => Self::PersistenceFailure(PersistenceStage::Insert),
        }
    }
}
