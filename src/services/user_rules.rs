use rust_decimal::Decimal;

use crate::errors::ValidationError;
use crate::types::domain::{Role, User};

pub const NAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 100;
pub const CONTACT_MAX_LEN: usize = 20;
pub const ROLE_NAME_MAX_LEN: usize = 50;

/// Validate a user profile against the existing roster
///
/// `existing` should contain every stored user; the record with the same id
/// as `candidate` is skipped for the uniqueness check so edits keep their email.
pub fn validate_user(candidate: &User, existing: &[User], roles: &[Role]) -> Result<(), ValidationError> {
    required("firstName", "First name", &candidate.first_name)?;
    max_len("firstName", "First name", &candidate.first_name, NAME_MAX_LEN)?;
    required("lastName", "Last name", &candidate.last_name)?;
    max_len("lastName", "Last name", &candidate.last_name, NAME_MAX_LEN)?;
    required("email", "Email", &candidate.email)?;
    max_len("email", "Email", &candidate.email, EMAIL_MAX_LEN)?;
    if !is_valid_email(candidate.email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    max_len("contactNumber", "Contact number", &candidate.contact_number, CONTACT_MAX_LEN)?;

    if candidate.hourly_rate < Decimal::ZERO {
        return Err(ValidationError::NegativeRate);
    }
    // Zero means unset; lecturers get the default rate on first access
    if candidate.hourly_rate > Decimal::ZERO && candidate.hourly_rate < min_rate() {
        return Err(ValidationError::RateTooSmall);
    }
    if !roles.iter().any(|r| r.id == candidate.role_id) {
        return Err(ValidationError::UnknownRole(candidate.role_id));
    }

    let email = candidate.email.trim();
    if existing
        .iter()
        .any(|u| u.id != candidate.id && u.email.trim().eq_ignore_ascii_case(email))
    {
        return Err(ValidationError::DuplicateEmail);
    }
    Ok(())
}

/// Smallest rate a user may carry (0.01)
pub fn min_rate() -> Decimal {
    Decimal::new(1, 2)
}

pub fn validate_role(candidate: &Role, existing: &[Role]) -> Result<(), ValidationError> {
    required("name", "Role name", &candidate.name)?;
    max_len("name", "Role name", &candidate.name, ROLE_NAME_MAX_LEN)?;

    let name = candidate.name.trim();
    if existing
        .iter()
        .any(|r| r.id != candidate.id && r.name.trim().eq_ignore_ascii_case(name))
    {
        return Err(ValidationError::DuplicateRoleName);
    }
    Ok(())
}

fn required(field: &'static str, label: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field, label });
    }
    Ok(())
}

fn max_len(
    field: &'static str,
    label: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, label, max });
    }
    Ok(())
}

/// Single `@`, non-empty local part, dotted domain without whitespace
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> Vec<Role> {
        vec![
            Role { id: 1, name: "Lecturer".to_string() },
            Role { id: 2, name: "Coordinator".to_string() },
        ]
    }

    fn user(id: i32, email: &str) -> User {
        User {
            id,
            first_name: "Mike".to_string(),
            last_name: "Johnson".to_string(),
            email: email.to_string(),
            contact_number: "0821234567".to_string(),
            hourly_rate: Decimal::from(450),
            role_id: 1,
        }
    }

    #[test]
    fn test_valid_user_passes() {
        let existing = vec![user(1, "sizwe.m@university.edu")];
        assert!(validate_user(&user(0, "mike.j@university.edu"), &existing, &roles()).is_ok());
    }

    #[test]
    fn test_required_fields_reported_in_order() {
        let mut candidate = user(0, "");
        candidate.first_name = "  ".to_string();

        let err = validate_user(&candidate, &[], &roles()).unwrap_err();
        assert_eq!(err.field(), Some("firstName"));
        assert_eq!(err.to_string(), "First name is required");
    }

    #[test]
    fn test_length_limits() {
        let mut candidate = user(0, "mike.j@university.edu");
        candidate.last_name = "x".repeat(NAME_MAX_LEN + 1);

        let err = validate_user(&candidate, &[], &roles()).unwrap_err();
        assert_eq!(err.to_string(), "Last name cannot exceed 50 characters");
    }

    #[test]
    fn test_email_format() {
        for bad in ["plainaddress", "a@b", "a@@b.com", "@b.com", "a b@c.com"] {
            assert_eq!(
                validate_user(&user(0, bad), &[], &roles()),
                Err(ValidationError::InvalidEmail),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_duplicate_email_ignores_case_but_not_self() {
        let existing = vec![user(1, "Mike.J@University.edu")];

        assert_eq!(
            validate_user(&user(0, "mike.j@university.edu"), &existing, &roles()),
            Err(ValidationError::DuplicateEmail)
        );
        assert!(validate_user(&user(1, "mike.j@university.edu"), &existing, &roles()).is_ok());
    }

    #[test]
    fn test_role_must_exist_and_rate_non_negative() {
        let mut candidate = user(0, "mike.j@university.edu");
        candidate.role_id = 42;
        assert_eq!(
            validate_user(&candidate, &[], &roles()),
            Err(ValidationError::UnknownRole(42))
        );

        candidate.role_id = 1;
        candidate.hourly_rate = Decimal::from(-1);
        assert_eq!(
            validate_user(&candidate, &[], &roles()),
            Err(ValidationError::NegativeRate)
        );
    }

    #[test]
    fn test_rate_below_a_cent_is_rejected() {
        let mut candidate = user(0, "new.person@university.edu");
        candidate.hourly_rate = "0.001".parse().unwrap();
        assert_eq!(
            validate_user(&candidate, &[], &roles()),
            Err(ValidationError::RateTooSmall)
        );
        assert_eq!(ValidationError::RateTooSmall.field(), Some("hourlyRate"));

        candidate.hourly_rate = "0.01".parse().unwrap();
        assert!(validate_user(&candidate, &[], &roles()).is_ok());

        candidate.hourly_rate = Decimal::ZERO;
        assert!(validate_user(&candidate, &[], &roles()).is_ok());
    }

    #[test]
    fn test_role_name_rules() {
        let existing = roles();

        assert!(validate_role(&Role { id: 0, name: "Manager".to_string() }, &existing).is_ok());
        assert_eq!(
            validate_role(&Role { id: 0, name: "lecturer".to_string() }, &existing),
            Err(ValidationError::DuplicateRoleName)
        );
        assert!(validate_role(&Role { id: 1, name: "Lecturer".to_string() }, &existing).is_ok());
        assert_eq!(
            validate_role(&Role { id: 0, name: String::new() }, &existing).unwrap_err().field(),
            Some("name")
        );
    }
}
