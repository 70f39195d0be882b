use std::fmt;

use crate::domain::models::user::Profile;

/// Raw registration input, as received from the caller
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    /// Age in years, as a digit string
    pub dob: String,
    pub profile: Profile,
}

/// A registration whose email and date of birth passed validation.
///
/// The password is still plaintext here; it is replaced by a hash when the
/// registration becomes a [`StoredUser`](crate::domain::models::user::StoredUser).
#[derive(Clone)]
pub struct ValidatedRegistration {
    email: String,
    username: String,
    password: String,
    dob: String,
    age: u64,
    profile: Profile,
}

impl ValidatedRegistration {
    pub(crate) fn new(request: RegistrationRequest, age: u64) -> Self {
        Self {
            email: request.email,
            username: request.username,
            password: request.password,
            dob: request.dob,
            age,
            profile: request.profile,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn password(&self) -> &str {
        &self.password
    }
    pub fn dob(&self) -> &str {
        &self.dob
    }
    pub fn age(&self) -> u64 {
        self.age
    }
    pub fn profile(&self) -> &Profile {
        &self.profile
    }
}

impl fmt::Debug for ValidatedRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedRegistration")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("dob", &self.dob)
            .field("age", &self.age)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}
