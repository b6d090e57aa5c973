pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountId, AccountSummary},
    confirmation::ConfirmationToken,
    credential_check::CredentialCheck,
    email::{Email, EmailError},
    lockout::{FailureOutcome, LockoutPolicy, LockoutState},
    password::{Password, PasswordError},
    password_policy::{PasswordPolicy, PasswordRuleViolation},
    session::{SessionIdentity, SessionView},
    username::{Username, UsernameError},
};

pub use ports::{
    account_store::{AccountStore, AccountStoreError},
    credential_hasher::{CredentialHasher, CredentialHasherError},
    email_client::EmailClient,
};
