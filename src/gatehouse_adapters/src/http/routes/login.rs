use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use gatehouse_application::LoginUseCase;
use gatehouse_core::{AccountId, AccountStore, CredentialCheck, CredentialHasher, LockoutPolicy};

use crate::http::cookies::create_auth_cookie;
use crate::security::jwt::TokenIssuer;

use super::error::AuthApiError;

#[derive(Clone)]
pub struct LoginState<S, H> {
    pub account_store: S,
    pub credential_hasher: H,
    pub token_issuer: TokenIssuer,
    pub lockout_policy: LockoutPolicy,
    pub require_confirmed: bool,
    pub cookie_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponseBody {
    pub id: AccountId,
    pub username: String,
    pub token: String,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<S, H>(
    State(state): State<LoginState<S, H>>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
{
    let use_case = LoginUseCase::new(
        state.account_store,
        state.credential_hasher,
        state.lockout_policy,
        state.require_confirmed,
    );

    let check = use_case
        .execute(&request.username, request.password)
        .await?;

    match check {
        CredentialCheck::Success(summary) => {
            let issued = state.token_issuer.issue(&summary)?;

            let auth_cookie = create_auth_cookie(issued.token.clone(), &state.cookie_name);
            let jar = jar.add(auth_cookie);

            let body = LoginResponseBody {
                id: summary.id,
                username: summary.username,
                token: issued.token,
            };

            Ok((jar, (StatusCode::OK, Json(body))))
        }

        // The use case has already logged the true cause. Out here every
        // refusal is the same refusal.
        CredentialCheck::InvalidCredentials
        | CredentialCheck::LockedOut
        | CredentialCheck::AccountNotFound => Err(AuthApiError::InvalidCredentials),
    }
}
