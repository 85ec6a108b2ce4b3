use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {0} characters")]
    TooShort(usize),
    #[error("Password must be at most {0} characters")]
    TooLong(usize),
    #[error("Password must contain at least one letter and one digit")]
    TooWeak,
}

pub struct PasswordPolicy;

impl PasswordPolicy {
    pub const MIN_LENGTH: usize = 8;
    pub const MAX_LENGTH: usize = 128;

    pub fn validate(password: &str) -> Result<(), PasswordPolicyError> {
        let length = password.chars().count();

        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort(Self::MIN_LENGTH));
        }

        if length > Self::MAX_LENGTH {
            return Err(PasswordPolicyError::TooLong(Self::MAX_LENGTH));
        }

        let has_letter = password.chars().any(|c| c.is_alphabetic());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        if !has_letter || !has_digit {
            return Err(PasswordPolicyError::TooWeak);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_letters_and_digits() {
        assert!(PasswordPolicy::validate("secret123").is_ok());
    }

    #[test]
    fn rejects_short_password() {
        assert_eq!(
            PasswordPolicy::validate("a1b2"),
            Err(PasswordPolicyError::TooShort(8))
        );
    }

    #[test]
    fn rejects_password_without_digit() {
        assert_eq!(
            PasswordPolicy::validate("onlyletters"),
            Err(PasswordPolicyError::TooWeak)
        );
    }

    #[test]
    fn rejects_overlong_password() {
        let long = format!("a1{}", "x".repeat(200));
        assert_eq!(
            PasswordPolicy::validate(&long),
            Err(PasswordPolicyError::TooLong(128))
        );
    }
}
