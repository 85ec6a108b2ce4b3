use std::sync::OnceLock;

use email_address::EmailAddress;
use regex::Regex;
use thiserror::Error;

use super::entities::Role;
use super::password_policy::PasswordPolicyError;

pub const MAX_NAME_LENGTH: usize = 50;

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone pattern is valid"))
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UserFieldError {
    #[error("{0} cannot be empty")]
    EmptyName(&'static str),

    #[error("{0} must not exceed 50 characters")]
    NameTooLong(&'static str),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid phone number")]
    InvalidPhone,

    #[error("At least one role is required")]
    EmptyRoles,

    #[error(transparent)]
    Password(#[from] PasswordPolicyError),
}

impl UserFieldError {
    /// Machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            UserFieldError::EmptyName(_) | UserFieldError::NameTooLong(_) => "INVALID_NAME",
            UserFieldError::InvalidEmail => "INVALID_EMAIL",
            UserFieldError::InvalidPhone => "INVALID_PHONE",
            UserFieldError::EmptyRoles => "INVALID_ROLES",
            UserFieldError::Password(_) => "WEAK_PASSWORD",
        }
    }
}

pub fn normalize_name(field: &'static str, value: &str) -> Result<String, UserFieldError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(UserFieldError::EmptyName(field));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(UserFieldError::NameTooLong(field));
    }

    Ok(value.to_string())
}

pub fn normalize_email(value: &str) -> Result<String, UserFieldError> {
    let value = value.trim().to_lowercase();

    if !EmailAddress::is_valid(&value) {
        return Err(UserFieldError::InvalidEmail);
    }

    Ok(value)
}

/// Blank input means "no phone".
pub fn normalize_phone(value: Option<String>) -> Result<Option<String>, UserFieldError> {
    let Some(raw) = value else {
        return Ok(None);
    };

    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if compact.is_empty() {
        return Ok(None);
    }
    if !phone_regex().is_match(&compact) {
        return Err(UserFieldError::InvalidPhone);
    }

    Ok(Some(compact))
}

/// Removes duplicates while keeping the first occurrence order.
pub fn normalize_roles(roles: Vec<Role>) -> Result<Vec<Role>, UserFieldError> {
    let mut unique = Vec::with_capacity(roles.len());
    for role in roles {
        if !unique.contains(&role) {
            unique.push(role);
        }
    }

    if unique.is_empty() {
        return Err(UserFieldError::EmptyRoles);
    }

    Ok(unique)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed() {
        assert_eq!(normalize_name("first_name", "  Ada ").unwrap(), "Ada");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            normalize_name("last_name", "   "),
            Err(UserFieldError::EmptyName("last_name"))
        );
    }

    #[test]
    fn long_name_is_rejected() {
        let long = "x".repeat(51);
        assert_eq!(
            normalize_name("first_name", &long),
            Err(UserFieldError::NameTooLong("first_name"))
        );
    }

    #[test]
    fn email_is_lowercased() {
        assert_eq!(
            normalize_email(" Ada@Example.COM ").unwrap(),
            "ada@example.com"
        );
        assert_eq!(normalize_email("not-an-email"), Err(UserFieldError::InvalidEmail));
    }

    #[test]
    fn phone_accepts_international_format() {
        assert_eq!(
            normalize_phone(Some("+62 812-3456-789".into())).unwrap(),
            Some("+628123456789".to_string())
        );
        assert_eq!(normalize_phone(Some("   ".into())).unwrap(), None);
        assert_eq!(normalize_phone(None).unwrap(), None);
    }

    #[test]
    fn phone_rejects_letters_and_short_numbers() {
        assert_eq!(
            normalize_phone(Some("12345".into())),
            Err(UserFieldError::InvalidPhone)
        );
        assert_eq!(
            normalize_phone(Some("call-me".into())),
            Err(UserFieldError::InvalidPhone)
        );
    }

    #[test]
    fn roles_are_deduplicated() {
        assert_eq!(
            normalize_roles(vec![Role::Admin, Role::User, Role::Admin]).unwrap(),
            vec![Role::Admin, Role::User]
        );
        assert_eq!(normalize_roles(vec![]), Err(UserFieldError::EmptyRoles));
    }
}
