use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, decode_header, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gatehouse_core::AccountSummary;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Unknown signing key: {0}")]
    UnknownKey(String),
    #[error("Rejected by validation hook: {0}")]
    RejectedByHook(&'static str),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// A named HMAC signing secret. The name travels in the token header so a
/// verifier can tell which key minted a token once rotation is in play.
#[derive(Clone)]
pub struct SigningKey {
    pub kid: String,
    pub secret: Secret<String>,
}

struct KeyMaterial {
    kid: String,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl From<&SigningKey> for KeyMaterial {
    fn from(key: &SigningKey) -> Self {
        let secret = key.secret.expose_secret().as_bytes();
        Self {
            kid: key.kid.clone(),
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// The keyring shared by issuer and verifier.
///
/// Swapping in a new key takes effect for both sides at once without a
/// restart; tokens minted under the previous key stop verifying.
#[derive(Clone)]
pub struct SigningKeys(Arc<ArcSwap<KeyMaterial>>);

impl SigningKeys {
    pub fn new(key: &SigningKey) -> Self {
        Self(Arc::new(ArcSwap::from_pointee(KeyMaterial::from(key))))
    }

    pub fn rotate(&self, key: &SigningKey) {
        self.0.store(Arc::new(KeyMaterial::from(key)));
    }

    fn current(&self) -> Arc<KeyMaterial> {
        self.0.load_full()
    }
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iat: usize,
    pub exp: usize,
    /// Deployment-specific claims, carried verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A signed token together with its expiry instant.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Mints session tokens for authenticated accounts.
#[derive(Clone)]
pub struct TokenIssuer {
    keys: SigningKeys,
    token_ttl_seconds: i64,
    extra_claims: serde_json::Map<String, serde_json::Value>,
}

impl TokenIssuer {
    pub fn new(keys: SigningKeys, token_ttl_seconds: i64) -> Self {
        Self {
            keys,
            token_ttl_seconds,
            extra_claims: serde_json::Map::new(),
        }
    }

    /// Claims stamped into every issued token, e.g. an `iss` or audience
    /// marker. Fixed at startup.
    pub fn with_extra_claims(
        mut self,
        claims: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        self.extra_claims = claims;
        self
    }

    pub fn issue(&self, account: &AccountSummary) -> Result<IssuedToken, TokenError> {
        // A zero or negative lifetime would mint tokens that are already
        // expired, with exp <= iat.
        if self.token_ttl_seconds <= 0 {
            return Err(TokenError::UnexpectedError(
                "Token lifetime must be positive".to_string(),
            ));
        }

        let delta = chrono::Duration::try_seconds(self.token_ttl_seconds).ok_or(
            TokenError::UnexpectedError("Failed to create token duration".to_string()),
        )?;

        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(delta)
            .ok_or(TokenError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?;

        let iat: usize = issued_at
            .timestamp()
            .try_into()
            .map_err(|_| TokenError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;
        let exp: usize = expires_at
            .timestamp()
            .try_into()
            .map_err(|_| TokenError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;

        let claims = Claims {
            sub: account.id.to_string(),
            username: account.username.clone(),
            email: Some(account.email.clone()),
            iat,
            exp,
            extra: self.extra_claims.clone(),
        };

        let key = self.keys.current();
        let mut header = jsonwebtoken::Header::default();
        header.kid = Some(key.kid.clone());

        let token = encode(&header, &claims, &key.encoding).map_err(TokenError::TokenError)?;
        Ok(IssuedToken { token, expires_at })
    }
}

/// Deployment-specific checks run after signature and lifetime validation
/// passed. Hooks run in registration order, may only inspect, and reject by
/// returning an error naming the reason.
pub trait PostValidationHook: Send + Sync {
    fn inspect(&self, claims: &Claims) -> Result<(), TokenError>;
}

/// Checks session tokens. The [`Validation`] rules are assembled once at
/// construction, not per request.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: SigningKeys,
    validation: Validation,
    hooks: Vec<Arc<dyn PostValidationHook>>,
}

impl TokenVerifier {
    pub fn new(keys: SigningKeys, leeway_seconds: u64) -> Self {
        let mut validation = Validation::default();
        validation.leeway = leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            keys,
            validation,
            hooks: Vec::new(),
        }
    }

    pub fn with_hook(mut self, hook: Arc<dyn PostValidationHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let key = self.keys.current();

        // A token naming a key we do not hold was minted before a rotation
        // and must not verify, whatever its signature says.
        if let Some(kid) = decode_header(token).map_err(TokenError::TokenError)?.kid {
            if kid != key.kid {
                return Err(TokenError::UnknownKey(kid));
            }
        }

        let claims = decode::<Claims>(token, &key.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::TokenError)?;

        for hook in &self.hooks {
            hook.inspect(&claims)?;
        }

        Ok(claims)
    }
}
