use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};

use gatehouse_core::{CredentialHasher, CredentialHasherError, Password};

/// A throwaway hash with the same parameters as real ones. Verified when no
/// account matches a login, so the unknown-username path costs as much as
/// the wrong-password path.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=15000,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// Argon2id hasher. The heavy lifting runs on the blocking pool; parameters
/// are embedded in the produced PHC string, so they can be raised later
/// without invalidating stored hashes.
#[derive(Clone, Copy, Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash_password(
        &self,
        password: &Password,
    ) -> Result<Secret<String>, CredentialHasherError> {
        let password = password.clone();
        let current_span: tracing::Span = tracing::Span::current();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                let hasher = Argon2::new(
                    Algorithm::Argon2id,
                    Version::V0x13,
                    Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
                );
                hasher
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| Secret::from(h.to_string()))
                    .map_err(|e| e.to_string())
            })
        })
        .await
        .map_err(|e| CredentialHasherError::UnexpectedError(e.to_string()))?;

        result.map_err(CredentialHasherError::UnexpectedError)
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify_password(
        &self,
        expected_hash: &Secret<String>,
        candidate: &Password,
    ) -> Result<(), CredentialHasherError> {
        let expected_hash = expected_hash.clone();
        let candidate = candidate.clone();
        let current_span: tracing::Span = tracing::Span::current();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected_hash: PasswordHash<'_> =
                    PasswordHash::new(expected_hash.expose_secret())
                        .map_err(|e| CredentialHasherError::UnexpectedError(e.to_string()))?;

                Argon2::new(
                    Algorithm::Argon2id,
                    Version::V0x13,
                    Params::new(15000, 2, 1, None)
                        .map_err(|e| CredentialHasherError::UnexpectedError(e.to_string()))?,
                )
                .verify_password(
                    candidate.as_ref().expose_secret().as_bytes(),
                    &expected_hash,
                )
                .map_err(|e| match e {
                    argon2::password_hash::Error::Password => CredentialHasherError::Mismatch,
                    e => CredentialHasherError::UnexpectedError(e.to_string()),
                })
            })
        })
        .await
        .map_err(|e| CredentialHasherError::UnexpectedError(e.to_string()))?;

        result
    }

    #[tracing::instrument(name = "Dummy password verification", skip_all)]
    async fn verify_dummy(&self, candidate: &Password) {
        let _ = self
            .verify_password(&Secret::from(DUMMY_PASSWORD_HASH.to_string()), candidate)
            .await;
    }
}
