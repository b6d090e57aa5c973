use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, Secret};
use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};

use gatehouse_adapters::config::Settings;

/// Configure and return a PostgreSQL connection pool.
///
/// Creates the pool from the configured database URL and runs all pending
/// migrations.
///
/// # Panics
/// Panics if unable to create the pool or run migrations.
pub async fn configure_postgresql(config: &Settings) -> PgPool {
    let pg_pool = get_postgres_pool(&config.postgres.url)
        .await
        .expect("Failed to create Postgres connection pool");

    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .expect("Failed to run migrations");

    pg_pool
}

/// Create a PostgreSQL connection pool with bounded waits: a connection
/// acquire times out after five seconds and every statement carries a
/// server-side timeout.
pub async fn get_postgres_pool(url: &Secret<String>) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(url.expose_secret())?
        .options([("statement_timeout", "5000")]);

    PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
}
