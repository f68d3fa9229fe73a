//! Authentication primitives: login credentials, the password policy and
//! email shape checks.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use zeroize::Zeroizing;

use super::normalise_email;

/// Minimum number of characters a password must contain.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Message returned for every failed sign-in, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password.";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by the sign-in service.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and non-empty.
/// - `password` is non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use catalog::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ada@Example.com ", "Secret1").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password(), "Secret1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = normalise_email(email);
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email suitable for user lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// A single password policy rule that was not met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordIssue {
    /// Fewer than [`PASSWORD_MIN_LEN`] characters.
    TooShort,
    /// No ASCII uppercase letter.
    MissingUppercase,
    /// No ASCII lowercase letter.
    MissingLowercase,
}

impl PasswordIssue {
    /// User-facing explanation of the unmet rule.
    pub fn message(self) -> &'static str {
        match self {
            Self::TooShort => "Password must be at least 6 characters long.",
            Self::MissingUppercase => "Password must contain at least one uppercase letter.",
            Self::MissingLowercase => "Password must contain at least one lowercase letter.",
        }
    }
}

/// Every rule a rejected password failed, in policy order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicyViolation {
    issues: Vec<PasswordIssue>,
}

impl PasswordPolicyViolation {
    /// Rules that were not met.
    pub fn issues(&self) -> &[PasswordIssue] {
        &self.issues
    }
}

impl fmt::Display for PasswordPolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .issues
            .iter()
            .map(|issue| issue.message())
            .collect::<Vec<_>>()
            .join(" ");
        f.write_str(&joined)
    }
}

impl std::error::Error for PasswordPolicyViolation {}

/// Check a candidate password against the strength policy.
///
/// There is no digit or symbol requirement.
///
/// # Examples
/// ```
/// use catalog::domain::{validate_password, PasswordIssue};
///
/// let err = validate_password("abc").unwrap_err();
/// assert_eq!(
///     err.issues(),
///     &[PasswordIssue::TooShort, PasswordIssue::MissingUppercase]
/// );
/// assert!(validate_password("Secret").is_ok());
/// ```
pub fn validate_password(password: &str) -> Result<(), PasswordPolicyViolation> {
    let mut issues = Vec::new();
    if password.chars().count() < PASSWORD_MIN_LEN {
        issues.push(PasswordIssue::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        issues.push(PasswordIssue::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        issues.push(PasswordIssue::MissingLowercase);
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(PasswordPolicyViolation { issues })
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Loose structural email check: something, `@`, something, `.`, something.
pub fn is_plausible_email(value: &str) -> bool {
    email_regex().is_match(value)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("ada@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn password_keeps_whitespace() {
        let creds = LoginCredentials::try_from_parts("ada@example.com", " Secret1 ")
            .expect("valid inputs should succeed");
        assert_eq!(creds.password(), " Secret1 ");
    }

    #[rstest]
    fn short_lowercase_password_reports_length_and_uppercase_only() {
        let err = validate_password("abc").expect_err("abc is too weak");
        assert_eq!(
            err.issues(),
            &[PasswordIssue::TooShort, PasswordIssue::MissingUppercase]
        );
        assert_eq!(
            err.to_string(),
            "Password must be at least 6 characters long. \
             Password must contain at least one uppercase letter."
        );
    }

    #[rstest]
    #[case("ABCDEF", &[PasswordIssue::MissingLowercase])]
    #[case("abcdef", &[PasswordIssue::MissingUppercase])]
    #[case("12", &[
        PasswordIssue::TooShort,
        PasswordIssue::MissingUppercase,
        PasswordIssue::MissingLowercase,
    ])]
    fn reports_every_unmet_rule(#[case] password: &str, #[case] expected: &[PasswordIssue]) {
        let err = validate_password(password).expect_err("weak password");
        assert_eq!(err.issues(), expected);
    }

    #[rstest]
    #[case("Secret")]
    #[case("aB3456")]
    #[case("no Symbols needed")]
    fn accepts_passwords_meeting_policy(#[case] password: &str) {
        assert!(validate_password(password).is_ok());
    }

    #[rstest]
    #[case("ada@example.com", true)]
    #[case("a@b.c", true)]
    #[case("ada@example", false)]
    #[case("ada example@x.com", false)]
    #[case("@example.com", false)]
    fn email_shape(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_plausible_email(value), expected);
    }
}
