use gatehouse_core::{AccountStore, AccountStoreError, AccountSummary, ConfirmationToken};

/// Error types specific to the confirmation use case.
#[derive(Debug, thiserror::Error)]
pub enum ConfirmError {
    /// Unknown, already used, or empty token. Deliberately one bucket so
    /// the response does not reveal which.
    #[error("invalid confirmation token")]
    InvalidToken,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

/// Confirmation use case - redeems a mailed token and unlocks login for
/// deployments that require a confirmed address.
pub struct ConfirmUseCase<S>
where
    S: AccountStore,
{
    account_store: S,
}

impl<S> ConfirmUseCase<S>
where
    S: AccountStore,
{
    pub fn new(account_store: S) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "ConfirmUseCase::execute", skip_all)]
    pub async fn execute(&self, token: &str) -> Result<AccountSummary, ConfirmError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfirmError::InvalidToken);
        }

        let token = ConfirmationToken::from(token.to_owned());
        match self.account_store.confirm_account(&token).await {
            Ok(summary) => {
                tracing::info!(username = %summary.username, "account confirmed");
                Ok(summary)
            }
            Err(AccountStoreError::AccountNotFound) => {
                tracing::info!("confirmation refused, token unknown or spent");
                Err(ConfirmError::InvalidToken)
            }
            Err(e) => Err(ConfirmError::AccountStoreError(e)),
        }
    }
}
