use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use gatehouse_core::{
    Account, AccountId, AccountStore, AccountStoreError, AccountSummary, ConfirmationToken, Email,
    LockoutPolicy, LockoutState, Username,
};

const USERNAME_UNIQUE_CONSTRAINT: &str = "accounts_username_normalized_key";
const EMAIL_UNIQUE_CONSTRAINT: &str = "accounts_email_normalized_key";

#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: Pool<Postgres>,
}

impl PostgresAccountStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresAccountStore { pool }
    }
}

fn account_from_row(row: &PgRow) -> Result<Account, AccountStoreError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
    let username: String = row
        .try_get("username")
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
    let failed_attempts: i32 = row
        .try_get("failed_attempts")
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
    let lockout_expiry: Option<DateTime<Utc>> = row
        .try_get("lockout_expiry")
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
    let confirmed: bool = row
        .try_get("confirmed")
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
    let confirmation_token: Option<String> = row
        .try_get("confirmation_token")
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

    let username = Username::parse(&username)
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
    let email =
        Email::parse(&email).map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

    Ok(Account::from_storage(
        AccountId::from(id),
        username,
        email,
        Secret::from(password_hash),
        LockoutState {
            failed_attempts,
            lockout_expiry,
        },
        confirmed,
        confirmation_token.map(ConfirmationToken::from),
        created_at,
    ))
}

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn add_account(&self, account: Account) -> Result<(), AccountStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO accounts
                    (id, username, username_normalized, email, email_normalized,
                     password_hash, failed_attempts, lockout_expiry, confirmed,
                     confirmation_token, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(account.id().as_uuid())
        .bind(account.username().as_str())
        .bind(account.username().normalized())
        .bind(account.email().as_str())
        .bind(account.email().normalized())
        .bind(account.password_hash().expose_secret())
        .bind(account.lockout().failed_attempts)
        .bind(account.lockout().lockout_expiry)
        .bind(account.is_confirmed())
        .bind(account.confirmation_token().map(|t| t.as_str().to_owned()))
        .bind(account.created_at());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                match db_err.constraint() {
                    Some(USERNAME_UNIQUE_CONSTRAINT) => {
                        return AccountStoreError::DuplicateUsername;
                    }
                    Some(EMAIL_UNIQUE_CONSTRAINT) => return AccountStoreError::DuplicateEmail,
                    _ => {}
                }
            }
            AccountStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving account from PostgreSQL", skip_all)]
    async fn find_by_username(&self, username: &Username) -> Result<Account, AccountStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, username, email, password_hash, failed_attempts,
                       lockout_expiry, confirmed, confirmation_token, created_at
                FROM accounts
                WHERE username_normalized = $1
            "#,
        )
        .bind(username.normalized())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(AccountStoreError::AccountNotFound);
        };

        account_from_row(&row)
    }

    async fn username_in_use(&self, username: &Username) -> Result<bool, AccountStoreError> {
        sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM accounts WHERE username_normalized = $1)"#,
        )
        .bind(username.normalized())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))
    }

    async fn email_in_use(&self, email: &Email) -> Result<bool, AccountStoreError> {
        sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM accounts WHERE email_normalized = $1)"#)
            .bind(email.normalized())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))
    }

    /// One statement, so concurrent failures serialize on the row and no
    /// increment is lost. Reaching the threshold stamps the expiry and
    /// resets the counter in the same write.
    #[tracing::instrument(name = "Recording failed attempt in PostgreSQL", skip_all)]
    async fn record_failed_attempt(
        &self,
        id: AccountId,
        policy: &LockoutPolicy,
    ) -> Result<LockoutState, AccountStoreError> {
        let locks_until = Utc::now() + policy.duration;

        let row = sqlx::query(
            r#"
                UPDATE accounts
                SET failed_attempts = CASE
                        WHEN failed_attempts + 1 >= $2 THEN 0
                        ELSE failed_attempts + 1
                    END,
                    lockout_expiry = CASE
                        WHEN failed_attempts + 1 >= $2 THEN $3
                        ELSE lockout_expiry
                    END
                WHERE id = $1
                RETURNING failed_attempts, lockout_expiry
            "#,
        )
        .bind(id.as_uuid())
        .bind(policy.threshold as i32)
        .bind(locks_until)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(AccountStoreError::AccountNotFound);
        };

        let failed_attempts: i32 = row
            .try_get("failed_attempts")
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
        let lockout_expiry: Option<DateTime<Utc>> = row
            .try_get("lockout_expiry")
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        Ok(LockoutState {
            failed_attempts,
            lockout_expiry,
        })
    }

    #[tracing::instrument(name = "Recording successful attempt in PostgreSQL", skip_all)]
    async fn record_successful_attempt(&self, id: AccountId) -> Result<(), AccountStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET failed_attempts = 0, lockout_expiry = NULL
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }

        Ok(())
    }

    /// The token is both the lookup key and the thing consumed, in one
    /// statement, so it redeems at most once.
    #[tracing::instrument(name = "Confirming account in PostgreSQL", skip_all)]
    async fn confirm_account(
        &self,
        token: &ConfirmationToken,
    ) -> Result<AccountSummary, AccountStoreError> {
        let row = sqlx::query(
            r#"
                UPDATE accounts
                SET confirmed = TRUE, confirmation_token = NULL
                WHERE confirmation_token = $1
                RETURNING id, username, email
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(AccountStoreError::AccountNotFound);
        };

        let id: Uuid = row
            .try_get("id")
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
        let username: String = row
            .try_get("username")
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
        let email: String = row
            .try_get("email")
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        Ok(AccountSummary {
            id: AccountId::from(id),
            username,
            email,
        })
    }
}
