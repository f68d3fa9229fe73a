//! Shared request parsing helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, LoginValidationError};

/// Validation error codes placed in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
        }
    }
}

/// Newtype wrapper for request field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const EMAIL_FIELD: FieldName = FieldName::new("email");
pub(crate) const PASSWORD_FIELD: FieldName = FieldName::new("password");

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must not be empty")).with_details(json!({
        "field": field,
        "code": ValidationCode::MissingField.as_str(),
    }))
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => missing_field_error(EMAIL_FIELD),
        LoginValidationError::EmptyPassword => missing_field_error(PASSWORD_FIELD),
    }
}

/// Trimmed query parameter; absent values read as empty.
pub(crate) fn trimmed(raw: Option<&str>) -> &str {
    raw.map(str::trim).unwrap_or_default()
}

/// 1-based page number taken from the leading digits of `raw`.
///
/// Anything without a leading integer, and anything below one, becomes 1.
pub(crate) fn parse_page(raw: Option<&str>) -> usize {
    let text = trimmed(raw);
    if text.starts_with('-') {
        return 1;
    }
    let unsigned = text.strip_prefix('+').unwrap_or(text);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];
    if digits.is_empty() {
        return 1;
    }
    // Only overflow can fail here; such pages clamp to the last one anyway.
    digits.parse::<usize>().unwrap_or(usize::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case::absent(None, 1)]
    #[case::blank(Some("  "), 1)]
    #[case::plain(Some("3"), 3)]
    #[case::padded(Some(" 4 "), 4)]
    #[case::trailing_text(Some("2abc"), 2)]
    #[case::decimal(Some("5.9"), 5)]
    #[case::signed(Some("+6"), 6)]
    #[case::zero(Some("0"), 1)]
    #[case::negative(Some("-3"), 1)]
    #[case::text(Some("last"), 1)]
    #[case::huge(Some("99999999999999999999999"), usize::MAX)]
    fn page_parameter_is_lenient(#[case] raw: Option<&str>, #[case] expected: usize) {
        assert_eq!(parse_page(raw), expected);
    }

    #[rstest]
    #[case(LoginValidationError::EmptyEmail, "email")]
    #[case(LoginValidationError::EmptyPassword, "password")]
    fn login_validation_names_the_field(#[case] err: LoginValidationError, #[case] field: &str) {
        let mapped = map_login_validation_error(err);
        assert_eq!(mapped.code(), ErrorCode::InvalidRequest);
        let details = mapped.details().expect("details present");
        assert_eq!(details["field"], field);
        assert_eq!(details["code"], "missing_field");
    }
}
