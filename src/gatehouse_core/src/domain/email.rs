use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;

/// Shape check only: one `@`, no whitespace, a dot somewhere in the domain.
/// Deliverability is proven by the confirmation email, not by the parser.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex must compile")
});

const MAX_LENGTH: usize = 320;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
    #[error("email must not be empty")]
    Empty,
    #[error("email is not a valid address")]
    Invalid,
}

/// A validated email address, lowercased for storage and comparison.
#[derive(Debug, Clone)]
pub struct Email {
    raw: String,
    normalized: String,
}

impl Email {
    pub fn parse(candidate: &str) -> Result<Self, EmailError> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if trimmed.chars().count() > MAX_LENGTH || !EMAIL_SHAPE.is_match(trimmed) {
            return Err(EmailError::Invalid);
        }
        Ok(Self {
            raw: trimmed.to_owned(),
            normalized: trimmed.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Lowercased form used as the storage and comparison key.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        let email = Email::parse("Alice@Example.com").unwrap();
        assert_eq!(email.as_str(), "Alice@Example.com");
        assert_eq!(email.normalized(), "alice@example.com");
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(Email::parse(""), Err(EmailError::Empty)));
        assert!(matches!(Email::parse("   "), Err(EmailError::Empty)));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for candidate in [
            "not-an-email",
            "missing-domain@",
            "@missing-local.com",
            "two@@ats.com",
            "spaces in@side.com",
            "no-dot@domain",
        ] {
            assert!(
                matches!(Email::parse(candidate), Err(EmailError::Invalid)),
                "{candidate} should be rejected"
            );
        }
    }

    #[test]
    fn equality_is_case_insensitive() {
        assert_eq!(
            Email::parse("ALICE@EXAMPLE.COM").unwrap(),
            Email::parse("alice@example.com").unwrap()
        );
    }
}
