use std::fmt;

use url::Url;

/// Longest custom short code a user may request.
pub const MAX_CUSTOM_CODE_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeError {
    InvalidFormat,
    TooLong,
}

impl CodeError {
    pub fn message(self) -> &'static str {
        match self {
            CodeError::InvalidFormat => {
                "Custom code can only contain letters, numbers, hyphens, and underscores"
            }
            CodeError::TooLong => "Custom code must be 10 characters or less",
        }
    }
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// True iff `input` parses as an absolute URL with a host. No network access.
pub fn validate_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}

/// Checks a user-supplied short code. An empty code means "no preference".
///
/// The character set is checked before the length, so an over-long code made
/// of valid characters reports [`CodeError::TooLong`].
pub fn validate_custom_code(code: &str) -> Option<CodeError> {
    if code.is_empty() {
        return None;
    }
    if !code.chars().all(is_code_char) {
        return Some(CodeError::InvalidFormat);
    }
    if code.chars().count() > MAX_CUSTOM_CODE_LEN {
        return Some(CodeError::TooLong);
    }
    None
}

/// True iff `code` could name an existing link. Codes only ever use the
/// custom-code alphabet, so anything else is never sent to the service.
pub(crate) fn is_short_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(is_code_char)
}

pub(crate) fn is_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_needs_scheme_and_host() {
        assert!(validate_url("https://example.com/a?b=c"));
        assert!(validate_url("http://localhost:3001"));
        assert!(!validate_url("example.com"));
        assert!(!validate_url("mailto:someone@example.com"));
        assert!(!validate_url("https://"));
        assert!(!validate_url(""));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert!(validate_url("  https://example.com  "));
    }

    #[test]
    fn format_wins_over_length() {
        assert_eq!(
            validate_custom_code("bad code with spaces"),
            Some(CodeError::InvalidFormat)
        );
    }
}
