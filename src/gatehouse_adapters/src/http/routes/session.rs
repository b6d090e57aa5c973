use askama::Template;
use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::Html,
};
use axum_extra::extract::CookieJar;

use gatehouse_core::SessionView;

use crate::http::extract::current_session;
use crate::security::jwt::TokenVerifier;

/// Shared state of the session surface: the JSON view, the rendered
/// partial and logout.
#[derive(Clone)]
pub struct SessionState {
    pub verifier: TokenVerifier,
    pub cookie_name: String,
}

#[tracing::instrument(name = "Session view", skip_all)]
pub async fn session(
    State(state): State<SessionState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Json<SessionView> {
    let identity = current_session(&state.verifier, &headers, &jar, &state.cookie_name);

    Json(SessionView::from(identity))
}

#[derive(Template)]
#[template(path = "login_partial.html")]
struct LoginPartialTemplate {
    is_authenticated: bool,
    display_name: String,
}

#[tracing::instrument(name = "Session partial", skip_all)]
pub async fn session_partial(
    State(state): State<SessionState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Html<String>, super::error::AuthApiError> {
    let identity = current_session(&state.verifier, &headers, &jar, &state.cookie_name);
    let view = SessionView::from(identity);

    let template = LoginPartialTemplate {
        is_authenticated: view.is_authenticated,
        display_name: view.display_name,
    };

    let html = template
        .render()
        .map_err(|e| super::error::AuthApiError::UnexpectedError(e.to_string()))?;

    Ok(Html(html))
}
