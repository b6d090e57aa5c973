use super::account::AccountSummary;

/// Outcome of checking a username/password pair.
///
/// Every variant here is an expected result of a login attempt and is
/// handled at the request boundary. Infrastructure failures travel
/// separately as errors. Callers must collapse all non-success variants
/// into one indistinguishable response; the distinction exists only for
/// internal audit logging.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialCheck {
    /// The credentials matched a usable account.
    Success(AccountSummary),
    /// The password was wrong, or the account exists but may not sign in.
    InvalidCredentials,
    /// The account is locked after repeated failures. The password was not
    /// compared.
    LockedOut,
    /// No account matches the username.
    AccountNotFound,
}

impl CredentialCheck {
    /// Internal label for audit logs. Never sent to the caller.
    pub fn audit_label(&self) -> &'static str {
        match self {
            CredentialCheck::Success(_) => "success",
            CredentialCheck::InvalidCredentials => "invalid_credentials",
            CredentialCheck::LockedOut => "locked_out",
            CredentialCheck::AccountNotFound => "account_not_found",
        }
    }
}
