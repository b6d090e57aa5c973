use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gatehouse_application::{ConfirmError, LoginError, RegisterError, RegistrationViolation};

use crate::security::jwt::TokenError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize)]
pub struct ViolationResponse {
    pub errors: Vec<ViolationEntry>,
}

#[derive(Serialize, Deserialize)]
pub struct ViolationEntry {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    /// The one message every authentication refusal collapses into.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("registration rejected")]
    Rejected(Vec<RegistrationViolation>),

    #[error("invalid or expired confirmation token")]
    InvalidConfirmationToken,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        match self {
            AuthApiError::Rejected(violations) => {
                let errors = violations
                    .into_iter()
                    .map(|violation| ViolationEntry {
                        code: violation.code().to_string(),
                        message: violation.to_string(),
                    })
                    .collect();

                (StatusCode::BAD_REQUEST, Json(ViolationResponse { errors })).into_response()
            }

            AuthApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse { error: message }),
            )
                .into_response(),

            AuthApiError::InvalidConfirmationToken => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { error: message }),
            )
                .into_response(),

            AuthApiError::UnexpectedError(e) => {
                tracing::error!(error = %e, "request failed with an unexpected error");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "an unexpected error occurred".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<LoginError> for AuthApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::AccountStoreError(e) => AuthApiError::UnexpectedError(e.to_string()),
            LoginError::CredentialHasherError(e) => AuthApiError::UnexpectedError(e.to_string()),
            LoginError::BookkeepingError(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<RegisterError> for AuthApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::Rejected(violations) => AuthApiError::Rejected(violations),
            RegisterError::AccountStoreError(e) => AuthApiError::UnexpectedError(e.to_string()),
            RegisterError::CredentialHasherError(e) => AuthApiError::UnexpectedError(e.to_string()),
            RegisterError::EmailError(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<ConfirmError> for AuthApiError {
    fn from(error: ConfirmError) -> Self {
        match error {
            ConfirmError::InvalidToken => AuthApiError::InvalidConfirmationToken,
            ConfirmError::AccountStoreError(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<TokenError> for AuthApiError {
    fn from(error: TokenError) -> Self {
        AuthApiError::UnexpectedError(error.to_string())
    }
}
