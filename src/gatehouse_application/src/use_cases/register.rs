use secrecy::{ExposeSecret, Secret};

use gatehouse_core::{
    Account, AccountStore, AccountStoreError, AccountSummary, ConfirmationToken, CredentialHasher,
    CredentialHasherError, Email, EmailClient, EmailError, Password, PasswordError, PasswordPolicy,
    PasswordRuleViolation, Username, UsernameError,
};

/// One reason a registration was turned down. A single request can carry
/// several of these at once.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistrationViolation {
    #[error("{0}")]
    InvalidUsername(UsernameError),
    #[error("{0}")]
    InvalidEmail(EmailError),
    #[error("{0}")]
    WeakPassword(PasswordRuleViolation),
    #[error("username already taken")]
    DuplicateUsername,
    #[error("email already registered")]
    DuplicateEmail,
}

impl RegistrationViolation {
    /// Stable machine-readable code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            RegistrationViolation::InvalidUsername(_) => "invalid_username",
            RegistrationViolation::InvalidEmail(_) => "invalid_email",
            RegistrationViolation::WeakPassword(_) => "weak_password",
            RegistrationViolation::DuplicateUsername => "duplicate_username",
            RegistrationViolation::DuplicateEmail => "duplicate_email",
        }
    }
}

/// Error types specific to the registration use case.
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    /// The request was understood and refused. User-correctable.
    #[error("registration rejected")]
    Rejected(Vec<RegistrationViolation>),
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Credential hasher error: {0}")]
    CredentialHasherError(#[from] CredentialHasherError),
    #[error("Failed to send confirmation email: {0}")]
    EmailError(String),
}

/// Registration use case - validates the requested identity, hashes the
/// password and commits the account in one step.
pub struct RegisterUseCase<S, H, E>
where
    S: AccountStore,
    H: CredentialHasher,
    E: EmailClient,
{
    account_store: S,
    credential_hasher: H,
    email_client: E,
    password_policy: PasswordPolicy,
    require_confirmed: bool,
}

impl<S, H, E> RegisterUseCase<S, H, E>
where
    S: AccountStore,
    H: CredentialHasher,
    E: EmailClient,
{
    pub fn new(
        account_store: S,
        credential_hasher: H,
        email_client: E,
        password_policy: PasswordPolicy,
        require_confirmed: bool,
    ) -> Self {
        Self {
            account_store,
            credential_hasher,
            email_client,
            password_policy,
            require_confirmed,
        }
    }

    /// Execute one registration request.
    ///
    /// All violations are collected before answering, so the caller learns
    /// about a weak password and a taken username in the same response. The
    /// account is only ever written complete, hash included.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        username: &str,
        email: &str,
        password: Secret<String>,
    ) -> Result<AccountSummary, RegisterError> {
        let mut violations = Vec::new();

        let username = match Username::parse(username) {
            Ok(username) => Some(username),
            Err(e) => {
                violations.push(RegistrationViolation::InvalidUsername(e));
                None
            }
        };
        let email = match Email::parse(email) {
            Ok(email) => Some(email),
            Err(e) => {
                violations.push(RegistrationViolation::InvalidEmail(e));
                None
            }
        };
        violations.extend(
            self.password_policy
                .violations(password.expose_secret())
                .into_iter()
                .map(RegistrationViolation::WeakPassword),
        );

        // Uniqueness is only worth checking for fields that parsed.
        if let Some(username) = &username {
            if self.account_store.username_in_use(username).await? {
                violations.push(RegistrationViolation::DuplicateUsername);
            }
        }
        if let Some(email) = &email {
            if self.account_store.email_in_use(email).await? {
                violations.push(RegistrationViolation::DuplicateEmail);
            }
        }

        let (username, email) = match (username, email, violations.is_empty()) {
            (Some(username), Some(email), true) => (username, email),
            _ => {
                tracing::info!(?violations, "registration rejected");
                return Err(RegisterError::Rejected(violations));
            }
        };

        let password = Password::try_from(password).map_err(|e| {
            RegisterError::Rejected(vec![RegistrationViolation::WeakPassword(match e {
                PasswordError::Empty => PasswordRuleViolation::TooShort {
                    min: self.password_policy.min_length.max(1),
                },
                PasswordError::TooLong => PasswordRuleViolation::TooLong {
                    max: self.password_policy.max_length,
                },
            })])
        })?;

        let password_hash = self.credential_hasher.hash_password(&password).await?;
        let confirmation_token = self
            .require_confirmed
            .then(ConfirmationToken::generate);
        let account = Account::register_new(
            username,
            email.clone(),
            password_hash,
            confirmation_token.clone(),
        );
        let summary = account.summary();

        match self.account_store.add_account(account).await {
            Ok(()) => {}
            // Lost a race with a concurrent registration. Same answer the
            // pre-check would have given.
            Err(AccountStoreError::DuplicateUsername) => {
                return Err(RegisterError::Rejected(vec![
                    RegistrationViolation::DuplicateUsername,
                ]));
            }
            Err(AccountStoreError::DuplicateEmail) => {
                return Err(RegisterError::Rejected(vec![
                    RegistrationViolation::DuplicateEmail,
                ]));
            }
            Err(e) => return Err(e.into()),
        }

        if let Some(token) = confirmation_token {
            self.email_client
                .send_email(
                    &email,
                    "Confirm your account",
                    &format!("Confirm your account using token {}", token.as_str()),
                )
                .await
                .map_err(RegisterError::EmailError)?;
        }

        tracing::info!(username = %summary.username, "account registered");
        Ok(summary)
    }
}
