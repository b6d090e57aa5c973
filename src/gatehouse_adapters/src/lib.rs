pub mod config;
pub mod email;
pub mod http;
pub mod persistence;
pub mod security;

// Re-export commonly used types for convenience
pub use self::config::settings::{
    ApplicationSettings, AuthSettings, EmailClientSettings, Environment, JwtSettings,
    LockoutSettings, PasswordSettings, PostgresSettings, Settings,
};
pub use self::http::routes::error::AuthApiError;
pub use email::{MockEmailClient, PostmarkEmailClient};
pub use persistence::{InMemoryAccountStore, PostgresAccountStore};
pub use security::{
    Argon2CredentialHasher,
    jwt::{
        Claims, IssuedToken, PostValidationHook, SigningKey, SigningKeys, TokenError, TokenIssuer,
        TokenVerifier,
    },
};
