use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::password::Password;

// CredentialHasher port trait and errors
#[derive(Debug, Error)]
pub enum CredentialHasherError {
    #[error("Password mismatch")]
    Mismatch,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for CredentialHasherError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Mismatch, Self::Mismatch) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Slow-hash port for credentials.
///
/// Implementations embed salt and parameters in the produced hash string
/// and must compare without leaking timing, so a stored hash is
/// self-describing and verification cost does not depend on how much of
/// the candidate matches.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash_password(
        &self,
        password: &Password,
    ) -> Result<Secret<String>, CredentialHasherError>;

    /// Ok when `candidate` matches `expected_hash`,
    /// [`CredentialHasherError::Mismatch`] when it does not.
    async fn verify_password(
        &self,
        expected_hash: &Secret<String>,
        candidate: &Password,
    ) -> Result<(), CredentialHasherError>;

    /// Burns the same work as a real verification against a fixed throwaway
    /// hash. Called when no account matches so response timing does not
    /// reveal which usernames exist.
    async fn verify_dummy(&self, candidate: &Password);
}
