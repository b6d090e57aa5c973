use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use gatehouse_application::ConfirmUseCase;
use gatehouse_core::AccountStore;

use super::error::AuthApiError;

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub token: String,
}

#[tracing::instrument(name = "Confirm account", skip_all)]
pub async fn confirm<S>(
    State(account_store): State<S>,
    Json(request): Json<ConfirmRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    S: AccountStore + Clone + 'static,
{
    let use_case = ConfirmUseCase::new(account_store);

    let summary = use_case.execute(&request.token).await?;

    Ok((StatusCode::OK, Json(summary)))
}
