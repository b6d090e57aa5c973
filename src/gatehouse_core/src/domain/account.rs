use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::confirmation::ConfirmationToken;
use super::email::Email;
use super::lockout::LockoutState;
use super::username::Username;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(candidate: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(candidate).map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AccountId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered account as the store holds it.
///
/// The password hash never leaves this type except through the hasher, and
/// an account always carries one. There is no state in which an account
/// exists without credentials.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    username: Username,
    email: Email,
    password_hash: Secret<String>,
    failed_attempts: i32,
    lockout_expiry: Option<DateTime<Utc>>,
    confirmed: bool,
    confirmation_token: Option<ConfirmationToken>,
    created_at: DateTime<Utc>,
}

impl Account {
    /// A brand-new account. Unconfirmed exactly when a confirmation token is
    /// handed over, confirmed from the start otherwise.
    pub fn register_new(
        username: Username,
        email: Email,
        password_hash: Secret<String>,
        confirmation_token: Option<ConfirmationToken>,
    ) -> Self {
        Self {
            id: AccountId::new(),
            username,
            email,
            password_hash,
            failed_attempts: 0,
            lockout_expiry: None,
            confirmed: confirmation_token.is_none(),
            confirmation_token,
            created_at: Utc::now(),
        }
    }

    /// Rebuilds an account from persisted columns.
    #[allow(clippy::too_many_arguments)]
    pub fn from_storage(
        id: AccountId,
        username: Username,
        email: Email,
        password_hash: Secret<String>,
        lockout: LockoutState,
        confirmed: bool,
        confirmation_token: Option<ConfirmationToken>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            failed_attempts: lockout.failed_attempts,
            lockout_expiry: lockout.lockout_expiry,
            confirmed,
            confirmation_token,
            created_at,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &Secret<String> {
        &self.password_hash
    }

    pub fn lockout(&self) -> LockoutState {
        LockoutState {
            failed_attempts: self.failed_attempts,
            lockout_expiry: self.lockout_expiry,
        }
    }

    pub fn is_locked_out(&self, now: DateTime<Utc>) -> bool {
        self.lockout().is_locked(now)
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn confirmation_token(&self) -> Option<&ConfirmationToken> {
        self.confirmation_token.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            username: self.username.as_str().to_owned(),
            email: self.email.as_str().to_owned(),
        }
    }
}

/// The externally visible identity of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub id: AccountId,
    pub username: String,
    pub email: String,
}
