use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    account::{Account, AccountId, AccountSummary},
    confirmation::ConfirmationToken,
    email::Email,
    lockout::{LockoutPolicy, LockoutState},
    username::Username,
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Username already taken")]
    DuplicateUsername,
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DuplicateUsername, Self::DuplicateUsername) => true,
            (Self::DuplicateEmail, Self::DuplicateEmail) => true,
            (Self::AccountNotFound, Self::AccountNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists a new account. Username and email must both be unused,
    /// case-insensitively, and the check is atomic with the insert so
    /// concurrent registrations cannot both win.
    async fn add_account(&self, account: Account) -> Result<(), AccountStoreError>;

    async fn find_by_username(&self, username: &Username) -> Result<Account, AccountStoreError>;

    async fn username_in_use(&self, username: &Username) -> Result<bool, AccountStoreError>;

    async fn email_in_use(&self, email: &Email) -> Result<bool, AccountStoreError>;

    /// Records one failed login attempt, applying `policy` in the same
    /// atomic step, and returns the state after the update. Concurrent
    /// failures against one account must not lose increments.
    async fn record_failed_attempt(
        &self,
        id: AccountId,
        policy: &LockoutPolicy,
    ) -> Result<LockoutState, AccountStoreError>;

    /// Clears the failed-attempt counter and any lockout after a successful
    /// login.
    async fn record_successful_attempt(&self, id: AccountId) -> Result<(), AccountStoreError>;

    /// Confirms the account holding `token` and consumes the token, in one
    /// atomic step, so a token confirms at most once.
    async fn confirm_account(
        &self,
        token: &ConfirmationToken,
    ) -> Result<AccountSummary, AccountStoreError>;
}
