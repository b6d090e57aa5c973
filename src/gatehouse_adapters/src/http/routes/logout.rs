use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;

use crate::http::cookies::create_removal_cookie;

use super::session::SessionState;

/// Logout is purely cookie removal. Tokens stay stateless, so there is
/// nothing to revoke server-side and no token is required to log out.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout(State(state): State<SessionState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(create_removal_cookie(&state.cookie_name));

    (jar, StatusCode::OK)
}
