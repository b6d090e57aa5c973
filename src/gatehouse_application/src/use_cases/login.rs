use chrono::Utc;
use secrecy::Secret;

use gatehouse_core::{
    AccountId, AccountStore, AccountStoreError, CredentialCheck, CredentialHasher,
    CredentialHasherError, LockoutPolicy, LockoutState, Password, Username,
};

/// Error types specific to the login use case.
///
/// Only infrastructure failures land here. Refused logins are expected
/// outcomes and travel as [`CredentialCheck`] variants.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Credential hasher error: {0}")]
    CredentialHasherError(#[from] CredentialHasherError),
    #[error("Attempt bookkeeping failed: {0}")]
    BookkeepingError(String),
}

/// Login use case - checks a username/password pair and keeps the
/// failed-attempt bookkeeping honest while doing so.
pub struct LoginUseCase<S, H>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher,
{
    account_store: S,
    credential_hasher: H,
    lockout_policy: LockoutPolicy,
    require_confirmed: bool,
}

impl<S, H> LoginUseCase<S, H>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher,
{
    pub fn new(
        account_store: S,
        credential_hasher: H,
        lockout_policy: LockoutPolicy,
        require_confirmed: bool,
    ) -> Self {
        Self {
            account_store,
            credential_hasher,
            lockout_policy,
            require_confirmed,
        }
    }

    /// Execute one login attempt.
    ///
    /// Every refusal is returned as a [`CredentialCheck`] variant together
    /// with an audit event naming the true cause; the caller must collapse
    /// all of them into one indistinguishable response.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        username: &str,
        password: Secret<String>,
    ) -> Result<CredentialCheck, LoginError> {
        let Ok(username) = Username::parse(username) else {
            tracing::info!(outcome = "malformed_username", "login refused");
            return Ok(CredentialCheck::InvalidCredentials);
        };
        let Ok(password) = Password::try_from(password) else {
            tracing::info!(username = %username, outcome = "malformed_password", "login refused");
            return Ok(CredentialCheck::InvalidCredentials);
        };

        let account = match self.account_store.find_by_username(&username).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => {
                // Burn a verification anyway so unknown usernames answer in
                // the same time as wrong passwords.
                self.credential_hasher.verify_dummy(&password).await;
                tracing::info!(username = %username, outcome = "account_not_found", "login refused");
                return Ok(CredentialCheck::AccountNotFound);
            }
            Err(e) => return Err(e.into()),
        };

        let now = Utc::now();
        if account.is_locked_out(now) {
            // The password is deliberately not compared while locked.
            tracing::info!(username = %username, outcome = "locked_out", "login refused");
            return Ok(CredentialCheck::LockedOut);
        }

        match self
            .credential_hasher
            .verify_password(account.password_hash(), &password)
            .await
        {
            Ok(()) => {
                if self.require_confirmed && !account.is_confirmed() {
                    tracing::info!(
                        username = %username,
                        outcome = "unconfirmed_account",
                        "login refused"
                    );
                    return Ok(CredentialCheck::InvalidCredentials);
                }
                self.clear_failed_attempts(account.id()).await?;
                tracing::info!(username = %username, "login succeeded");
                Ok(CredentialCheck::Success(account.summary()))
            }
            Err(CredentialHasherError::Mismatch) => {
                let state = self.record_failed_attempt(account.id()).await?;
                if state.is_locked(now) {
                    tracing::warn!(
                        username = %username,
                        lockout_expiry = ?state.lockout_expiry,
                        "account locked after repeated failures"
                    );
                }
                tracing::info!(username = %username, outcome = "invalid_credentials", "login refused");
                Ok(CredentialCheck::InvalidCredentials)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Runs the counter update on its own task so it still completes when
    /// the caller's request is cancelled mid-flight.
    async fn record_failed_attempt(&self, id: AccountId) -> Result<LockoutState, LoginError> {
        let store = self.account_store.clone();
        let policy = self.lockout_policy.clone();
        tokio::spawn(async move { store.record_failed_attempt(id, &policy).await })
            .await
            .map_err(|e| LoginError::BookkeepingError(e.to_string()))?
            .map_err(Into::into)
    }

    async fn clear_failed_attempts(&self, id: AccountId) -> Result<(), LoginError> {
        let store = self.account_store.clone();
        tokio::spawn(async move { store.record_successful_attempt(id).await })
            .await
            .map_err(|e| LoginError::BookkeepingError(e.to_string()))?
            .map_err(Into::into)
    }
}
