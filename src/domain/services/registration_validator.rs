use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::{
    error::DomainError,
    models::registration::{RegistrationRequest, ValidatedRegistration},
};

lazy_static! {
    /// local-part@domain.tld, where the final label is at least two letters
    /// - Valid: "ann@x.com", "first.last+tag@mail.example.org"
    /// - Invalid: "not-an-email", "ann@x", "ann@x.c", "@x.com"
    pub static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

/// Format checks run before any store access. Email is checked first.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationValidator;

impl RegistrationValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, request: RegistrationRequest) -> Result<ValidatedRegistration, DomainError> {
        if !is_valid_email(&request.email) {
            return Err(DomainError::InvalidEmail);
        }
        let age = parse_age(&request.dob).ok_or(DomainError::InvalidDateOfBirth)?;

        Ok(ValidatedRegistration::new(request, age))
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// The date of birth is carried as an age in years. Any signed integer
/// literal parses; negative values are rejected.
pub fn parse_age(dob: &str) -> Option<u64> {
    dob.parse::<i64>().ok().and_then(|age| u64::try_from(age).ok())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::models::user::Profile;

    fn request(email: &str, dob: &str) -> RegistrationRequest {
        RegistrationRequest {
            email: email.to_string(),
            username: "ann".to_string(),
            password: "pw123".to_string(),
            dob: dob.to_string(),
            profile: Profile::default(),
        }
    }

    #[rstest]
    #[case("ann@x.com")]
    #[case("first.last+tag@mail.example.org")]
    #[case("UPPER_case%1@Sub-Domain.IO")]
    #[case("a-b@c.d.museum")]
    fn accepts_well_formed_emails(#[case] email: &str) {
        assert!(is_valid_email(email));
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("")]
    #[case("@x.com")]
    #[case("ann@")]
    #[case("ann@x")]
    #[case("ann@x.c")]
    #[case("ann@x.c0m")]
    #[case("ann x@x.com")]
    #[case("ann@@x.com")]
    #[case("ann@x.com ")]
    fn rejects_malformed_emails(#[case] email: &str) {
        assert!(!is_valid_email(email));
    }

    #[rstest]
    #[case("0", 0)]
    #[case("30", 30)]
    #[case("+7", 7)]
    #[case("-0", 0)]
    fn accepts_non_negative_ages(#[case] dob: &str, #[case] expected: u64) {
        assert_eq!(parse_age(dob), Some(expected));
    }

    #[rstest]
    #[case("-5")]
    #[case("")]
    #[case("thirty")]
    #[case("30.5")]
    #[case(" 30")]
    #[case("1990-04-01")]
    #[case("99999999999999999999")]
    fn rejects_invalid_ages(#[case] dob: &str) {
        assert_eq!(parse_age(dob), None);
    }

    #[test]
    fn validate_keeps_the_request_fields() {
        let validated = RegistrationValidator::new()
            .validate(request("ann@x.com", "30"))
            .unwrap();

        assert_eq!(validated.email(), "ann@x.com");
        assert_eq!(validated.username(), "ann");
        assert_eq!(validated.password(), "pw123");
        assert_eq!(validated.dob(), "30");
        assert_eq!(validated.age(), 30);
    }

    #[test]
    fn invalid_email_reported_before_invalid_dob() {
        let result = RegistrationValidator::new().validate(request("not-an-email", "-5"));
        assert!(matches!(result, Err(DomainError::InvalidEmail)));
    }

    #[test]
    fn negative_dob_is_rejected() {
        let result = RegistrationValidator::new().validate(request("ann@x.com", "-5"));
        assert!(matches!(result, Err(DomainError::InvalidDateOfBirth)));
    }
}
