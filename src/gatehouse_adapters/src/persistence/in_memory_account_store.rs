use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use gatehouse_core::{
    Account, AccountId, AccountStore, AccountStoreError, AccountSummary, ConfirmationToken, Email,
    LockoutPolicy, LockoutState, Username,
};

/// Account store backed by sharded in-process maps. Used by tests and local
/// development; the lookup keys are the normalized forms, so it enforces
/// the same case-insensitive uniqueness as the SQL schema.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<DashMap<AccountId, Account>>,
    usernames: Arc<DashMap<String, AccountId>>,
    emails: Arc<DashMap<String, AccountId>>,
    confirmation_tokens: Arc<DashMap<String, AccountId>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_lockout(account: &Account, state: LockoutState) -> Account {
        Account::from_storage(
            account.id(),
            account.username().clone(),
            account.email().clone(),
            account.password_hash().clone(),
            state,
            account.is_confirmed(),
            account.confirmation_token().cloned(),
            account.created_at(),
        )
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    #[tracing::instrument(name = "Adding account to in-memory store", skip_all)]
    async fn add_account(&self, account: Account) -> Result<(), AccountStoreError> {
        let id = account.id();

        // Reserve the username, then the email. Losing the email race rolls
        // the username reservation back.
        match self.usernames.entry(account.username().normalized().to_owned()) {
            Entry::Occupied(_) => return Err(AccountStoreError::DuplicateUsername),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }
        match self.emails.entry(account.email().normalized().to_owned()) {
            Entry::Occupied(_) => {
                self.usernames.remove(account.username().normalized());
                return Err(AccountStoreError::DuplicateEmail);
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        if let Some(token) = account.confirmation_token() {
            self.confirmation_tokens.insert(token.as_str().to_owned(), id);
        }
        self.accounts.insert(id, account);
        Ok(())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Account, AccountStoreError> {
        let id = self
            .usernames
            .get(username.normalized())
            .map(|entry| *entry.value())
            .ok_or(AccountStoreError::AccountNotFound)?;
        self.accounts
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn username_in_use(&self, username: &Username) -> Result<bool, AccountStoreError> {
        Ok(self.usernames.contains_key(username.normalized()))
    }

    async fn email_in_use(&self, email: &Email) -> Result<bool, AccountStoreError> {
        Ok(self.emails.contains_key(email.normalized()))
    }

    #[tracing::instrument(name = "Recording failed attempt in in-memory store", skip_all)]
    async fn record_failed_attempt(
        &self,
        id: AccountId,
        policy: &LockoutPolicy,
    ) -> Result<LockoutState, AccountStoreError> {
        // get_mut holds the shard lock, making the read-modify-write atomic
        // against concurrent attempts on the same account.
        let mut entry = self
            .accounts
            .get_mut(&id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        let state = policy.next_state(entry.lockout(), Utc::now());
        *entry = Self::with_lockout(&entry, state);
        Ok(state)
    }

    #[tracing::instrument(name = "Recording successful attempt in in-memory store", skip_all)]
    async fn record_successful_attempt(&self, id: AccountId) -> Result<(), AccountStoreError> {
        let mut entry = self
            .accounts
            .get_mut(&id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        *entry = Self::with_lockout(
            &entry,
            LockoutState {
                failed_attempts: 0,
                lockout_expiry: None,
            },
        );
        Ok(())
    }

    #[tracing::instrument(name = "Confirming account in in-memory store", skip_all)]
    async fn confirm_account(
        &self,
        token: &ConfirmationToken,
    ) -> Result<AccountSummary, AccountStoreError> {
        // Removing the token is the atomic claim; a second confirmation
        // with the same token finds nothing.
        let (_, id) = self
            .confirmation_tokens
            .remove(token.as_str())
            .ok_or(AccountStoreError::AccountNotFound)?;

        let mut entry = self
            .accounts
            .get_mut(&id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        let confirmed = Account::from_storage(
            entry.id(),
            entry.username().clone(),
            entry.email().clone(),
            entry.password_hash().clone(),
            entry.lockout(),
            true,
            None,
            entry.created_at(),
        );
        let summary = confirmed.summary();
        *entry = confirmed;
        Ok(summary)
    }
}
