use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use gatehouse_application::RegisterUseCase;
use gatehouse_core::{AccountStore, CredentialHasher, EmailClient, PasswordPolicy};

use super::error::AuthApiError;

/// Everything the registration route needs. Handles are cheap clones.
#[derive(Clone)]
pub struct RegisterState<S, H, E> {
    pub account_store: S,
    pub credential_hasher: H,
    pub email_client: E,
    pub password_policy: PasswordPolicy,
    pub require_confirmed: bool,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<S, H, E>(
    State(state): State<RegisterState<S, H, E>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let use_case = RegisterUseCase::new(
        state.account_store,
        state.credential_hasher,
        state.email_client,
        state.password_policy,
        state.require_confirmed,
    );

    let summary = use_case
        .execute(&request.username, &request.email, request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(summary)))
}
