use color_eyre::eyre::Result;
use reqwest::Client as HttpClient;

use gatehouse_adapters::{
    Argon2CredentialHasher, PostgresAccountStore, PostmarkEmailClient, SigningKey, SigningKeys,
    TokenIssuer, TokenVerifier, config::Settings,
};
use gatehouse_core::Email;
use gatehouse_service::{AuthService, ServiceOptions, configure_postgresql, tracing::init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;
    init_tracing()?;

    let config = Settings::load();

    let pg_pool = configure_postgresql(config).await;
    let account_store = PostgresAccountStore::new(pg_pool);
    let credential_hasher = Argon2CredentialHasher::new();

    let http_client = HttpClient::builder()
        .timeout(config.email_client.timeout())
        .build()?;
    let sender = Email::parse(&config.email_client.sender)?;
    let email_client = PostmarkEmailClient::new(
        config.email_client.base_url.clone(),
        sender,
        config.email_client.auth_token.clone(),
        http_client,
    );

    let signing_keys = SigningKeys::new(&SigningKey {
        kid: config.auth.jwt.key_id.clone(),
        secret: config.auth.jwt.secret.clone(),
    });
    let token_issuer = TokenIssuer::new(signing_keys.clone(), config.auth.jwt.time_to_live);
    let token_verifier = TokenVerifier::new(signing_keys, config.auth.jwt.leeway);

    let service = AuthService::new(
        account_store,
        credential_hasher,
        email_client,
        token_issuer,
        token_verifier,
        ServiceOptions {
            lockout_policy: config.auth.lockout.policy(),
            password_policy: config.auth.password.policy(),
            require_confirmed: config.auth.require_confirmed,
            cookie_name: config.auth.jwt.cookie_name.clone(),
        },
    );

    let listener = tokio::net::TcpListener::bind(config.application.address()).await?;

    service
        .run_standalone(listener, Some(config.auth.allowed_origins.clone()))
        .await?;

    Ok(())
}
