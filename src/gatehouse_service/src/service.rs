use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use gatehouse_adapters::{
    config::AllowedOrigins,
    http::routes::{
        LoginState, RegisterState, SessionState, confirm, healthz, login, logout, register,
        session, session_partial,
    },
    security::jwt::{TokenIssuer, TokenVerifier},
};
use gatehouse_core::{AccountStore, CredentialHasher, EmailClient, LockoutPolicy, PasswordPolicy};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Policies and knobs the composition root hands the service.
pub struct ServiceOptions {
    pub lockout_policy: LockoutPolicy,
    pub password_policy: PasswordPolicy,
    pub require_confirmed: bool,
    pub cookie_name: String,
}

/// The authentication service with all of its routes.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Assemble the service from its adapters.
    ///
    /// Stores and clients are cheap clones over shared interiors, so each
    /// route is given exactly the handles it needs. Hooks on the verifier
    /// must already be registered; the router holds it as assembled here.
    pub fn new<S, H, E>(
        account_store: S,
        credential_hasher: H,
        email_client: E,
        token_issuer: TokenIssuer,
        token_verifier: TokenVerifier,
        options: ServiceOptions,
    ) -> Self
    where
        S: AccountStore + Clone + 'static,
        H: CredentialHasher + Clone + 'static,
        E: EmailClient + Clone + 'static,
    {
        let register_state = RegisterState {
            account_store: account_store.clone(),
            credential_hasher: credential_hasher.clone(),
            email_client,
            password_policy: options.password_policy,
            require_confirmed: options.require_confirmed,
        };

        let login_state = LoginState {
            account_store: account_store.clone(),
            credential_hasher,
            token_issuer,
            lockout_policy: options.lockout_policy,
            require_confirmed: options.require_confirmed,
            cookie_name: options.cookie_name.clone(),
        };

        let session_state = SessionState {
            verifier: token_verifier,
            cookie_name: options.cookie_name,
        };

        let router = Router::new()
            .route("/register", post(register::<S, H, E>))
            .with_state(register_state)
            .route("/login", post(login::<S, H>))
            .with_state(login_state)
            .route("/confirm", post(confirm::<S>))
            .with_state(account_store)
            .route("/logout", post(logout))
            .with_state(session_state.clone())
            .route("/session", get(session))
            .with_state(session_state.clone())
            .route("/session/partial", get(session_partial))
            .with_state(session_state)
            .route("/healthz", get(healthz));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be nested into a larger
    /// application.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server on the given listener.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
