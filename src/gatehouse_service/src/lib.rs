pub mod helpers;
pub mod service;
pub mod tracing;

pub use helpers::{configure_postgresql, get_postgres_pool};
pub use service::{AuthService, ServiceOptions};
