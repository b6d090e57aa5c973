use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use axum::http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;

use gatehouse_core::{LockoutPolicy, PasswordPolicy};

use super::constants::env;

static SETTINGS: LazyLock<Settings> =
    LazyLock::new(|| Settings::build().expect("Failed to load configuration"));

/// Service configuration, layered from `base.json`, the environment file
/// and `GATEHOUSE_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub postgres: PostgresSettings,
    pub auth: AuthSettings,
    pub email_client: EmailClientSettings,
}

impl Settings {
    pub fn load() -> &'static Settings {
        &SETTINGS
    }

    pub fn build() -> Result<Settings, config::ConfigError> {
        let config_dir = std::env::var(env::CONFIG_DIR_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        let environment: Environment = std::env::var(env::ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| "local".to_string())
            .try_into()
            .map_err(config::ConfigError::Message)?;

        let environment_file = format!("{}.json", environment.as_str());

        let settings = config::Config::builder()
            .add_source(config::File::from(config_dir.join("base.json")))
            .add_source(config::File::from(config_dir.join(environment_file)))
            .add_source(
                config::Environment::with_prefix("GATEHOUSE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize::<Settings>()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt: JwtSettings,
    pub lockout: LockoutSettings,
    pub password: PasswordSettings,
    pub require_confirmed: bool,
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub key_id: String,
    pub time_to_live: i64,
    pub leeway: u64,
    pub cookie_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LockoutSettings {
    pub threshold: u32,
    pub duration_minutes: i64,
}

impl LockoutSettings {
    pub fn policy(&self) -> LockoutPolicy {
        LockoutPolicy {
            threshold: self.threshold,
            duration: chrono::Duration::minutes(self.duration_minutes),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordSettings {
    pub min_length: usize,
    pub max_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl PasswordSettings {
    pub fn policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            min_length: self.min_length,
            max_length: self.max_length,
            require_uppercase: self.require_uppercase,
            require_lowercase: self.require_lowercase,
            require_digit: self.require_digit,
            require_special: self.require_special,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

/// Origins CORS will admit with credentials.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{other} is not a supported environment, use `local` or `production`"
            )),
        }
    }
}
