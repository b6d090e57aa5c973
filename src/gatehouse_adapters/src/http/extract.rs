use axum::http::{HeaderMap, header};
use axum_extra::extract::CookieJar;

use gatehouse_core::{AccountId, SessionIdentity};

use crate::security::jwt::{Claims, TokenVerifier};

/// Pulls the raw session token off a request. The `Authorization: Bearer`
/// header wins over the auth cookie when both are present.
pub fn extract_token(headers: &HeaderMap, jar: &CookieJar, cookie_name: &str) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        if let Some(token) = value.to_str().ok().and_then(|v| v.strip_prefix("Bearer ")) {
            return Some(token.trim().to_owned());
        }
    }

    jar.get(cookie_name)
        .map(|cookie| cookie.value().to_owned())
}

/// The identity a request carries, if it carries a verifiable token.
///
/// Every rejection folds into `None`. The concrete cause is only logged, so
/// a caller cannot answer differently for a missing, expired or forged
/// token.
pub fn current_session(
    verifier: &TokenVerifier,
    headers: &HeaderMap,
    jar: &CookieJar,
    cookie_name: &str,
) -> Option<SessionIdentity> {
    let token = extract_token(headers, jar, cookie_name)?;

    match verifier.verify(&token) {
        Ok(claims) => session_from_claims(&claims),
        Err(e) => {
            tracing::debug!(cause = %e, "presented token failed verification");
            None
        }
    }
}

fn session_from_claims(claims: &Claims) -> Option<SessionIdentity> {
    let Ok(account_id) = AccountId::parse(&claims.sub) else {
        tracing::debug!(sub = %claims.sub, "token subject is not an account id");
        return None;
    };

    Some(SessionIdentity {
        account_id,
        username: claims.username.clone(),
        email: claims.email.clone(),
    })
}
