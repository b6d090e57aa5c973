use std::fmt;
use std::hash::{Hash, Hasher};

/// Symbols permitted in a username besides ASCII letters and digits.
const ALLOWED_SYMBOLS: &[char] = &['-', '.', '_', '@', '+'];

const MAX_LENGTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UsernameError {
    #[error("username must not be empty")]
    Empty,
    #[error("username must be at most {MAX_LENGTH} characters")]
    TooLong,
    #[error("username may only contain letters, digits and -._@+")]
    ForbiddenCharacters,
}

/// A validated username.
///
/// Keeps the form the caller typed for display alongside a lowercased form,
/// so lookups and uniqueness are case-insensitive while the account still
/// renders the way it was registered.
#[derive(Debug, Clone)]
pub struct Username {
    raw: String,
    normalized: String,
}

impl Username {
    pub fn parse(candidate: &str) -> Result<Self, UsernameError> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }
        if trimmed.chars().count() > MAX_LENGTH {
            return Err(UsernameError::TooLong);
        }
        let allowed = |c: char| c.is_ascii_alphanumeric() || ALLOWED_SYMBOLS.contains(&c);
        if !trimmed.chars().all(allowed) {
            return Err(UsernameError::ForbiddenCharacters);
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

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for Username {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for Username {}

impl Hash for Username {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}
