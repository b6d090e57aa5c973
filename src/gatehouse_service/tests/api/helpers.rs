use std::sync::LazyLock;

use reqwest::Client;
use secrecy::Secret;
use uuid::Uuid;

use gatehouse_adapters::{
    Argon2CredentialHasher, InMemoryAccountStore, MockEmailClient, SigningKey, SigningKeys,
    TokenIssuer, TokenVerifier, config::constants::test,
};
use gatehouse_core::{LockoutPolicy, PasswordPolicy};
use gatehouse_service::{AuthService, ServiceOptions, tracing::init_tracing};

pub const COOKIE_NAME: &str = "gatehouse_session";

static TRACING: LazyLock<()> = LazyLock::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        init_tracing().expect("Failed to initialize tracing");
    }
});

/// A running service on a random port, backed by the in-memory store and a
/// recording email client.
pub struct TestApp {
    pub address: String,
    pub http_client: Client,
    pub email_client: MockEmailClient,
}

impl TestApp {
    /// Service with confirmation switched off: a fresh registration can log
    /// in straight away.
    pub async fn new() -> TestApp {
        Self::spawn(false).await
    }

    /// Service that refuses logins until the account confirms its email.
    pub async fn with_confirmation_required() -> TestApp {
        Self::spawn(true).await
    }

    async fn spawn(require_confirmed: bool) -> TestApp {
        LazyLock::force(&TRACING);

        let account_store = InMemoryAccountStore::new();
        let credential_hasher = Argon2CredentialHasher::new();
        let email_client = MockEmailClient::new();

        let signing_keys = SigningKeys::new(&SigningKey {
            kid: "test".to_string(),
            secret: Secret::from(Uuid::new_v4().to_string()),
        });
        let token_issuer = TokenIssuer::new(signing_keys.clone(), 600);
        let token_verifier = TokenVerifier::new(signing_keys, 0);

        let service = AuthService::new(
            account_store,
            credential_hasher,
            email_client.clone(),
            token_issuer,
            token_verifier,
            ServiceOptions {
                lockout_policy: LockoutPolicy::default(),
                password_policy: PasswordPolicy::default(),
                require_confirmed,
                cookie_name: COOKIE_NAME.to_string(),
            },
        );

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!(
            "http://{}",
            listener.local_addr().expect("Failed to read local address")
        );

        tokio::spawn(service.run_standalone(listener, None));

        let http_client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build test client");

        TestApp {
            address,
            http_client,
            email_client,
        }
    }

    pub async fn post_register<Body: serde::Serialize>(&self, body: &Body) -> reqwest::Response {
        self.http_client
            .post(format!("{}/register", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_login<Body: serde::Serialize>(&self, body: &Body) -> reqwest::Response {
        self.http_client
            .post(format!("{}/login", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_confirm<Body: serde::Serialize>(&self, body: &Body) -> reqwest::Response {
        self.http_client
            .post(format!("{}/confirm", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_logout(&self) -> reqwest::Response {
        self.http_client
            .post(format!("{}/logout", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_session(&self) -> reqwest::Response {
        self.http_client
            .get(format!("{}/session", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_session_partial(&self) -> reqwest::Response {
        self.http_client
            .get(format!("{}/session/partial", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// The confirmation token carried by the most recent mail the service
    /// sent. The mail ends with the token, so the last word is it.
    pub async fn last_confirmation_token(&self) -> String {
        let sent = self.email_client.sent().await;
        let mail = sent.last().expect("No confirmation mail was sent");
        mail.content
            .rsplit(' ')
            .next()
            .expect("Confirmation mail carried no token")
            .to_string()
    }
}

pub fn register_body(username: &str, email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "username": username, "email": email, "password": password })
}

pub fn login_body(username: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "username": username, "password": password })
}

/// The auth cookie a response set, as a `name=value` pair ready for a
/// `Cookie` request header.
pub fn auth_cookie_header(response: &reqwest::Response, cookie_name: &str) -> Option<String> {
    response
        .cookies()
        .find(|cookie| cookie.name() == cookie_name)
        .map(|cookie| format!("{}={}", cookie.name(), cookie.value()))
}
