use secrecy::{ExposeSecret, Secret};

/// Hard cap applied before any hashing work, independent of policy.
const MAX_LENGTH: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    #[error("password must not be empty")]
    Empty,
    #[error("password must be at most {MAX_LENGTH} characters")]
    TooLong,
}

/// A password in transit. Wrapped in [`Secret`] so it is redacted in debug
/// output and never serialized.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(candidate: Secret<String>) -> Result<Self, Self::Error> {
        if candidate.expose_secret().is_empty() {
            return Err(PasswordError::Empty);
        }
        if candidate.expose_secret().chars().count() > MAX_LENGTH {
            return Err(PasswordError::TooLong);
        }
        Ok(Self(candidate))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
