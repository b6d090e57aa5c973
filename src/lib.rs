//! # Gatehouse - Authentication Service Library
//!
//! This is a facade crate that re-exports all public APIs from the auth service components.
//! Use this crate to get access to all authentication functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! gatehouse = { path = "../gatehouse" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Username`, `Email`, `Account`, etc.
//! - **Port traits**: `AccountStore`, `CredentialHasher`, `EmailClient`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `ConfirmUseCase`
//! - **Adapters**: `PostgresAccountStore`, `Argon2CredentialHasher`, `PostmarkEmailClient`, etc.
//! - **Service**: `AuthService` - The main entry point for the auth service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use gatehouse_core::*;
}

// Re-export most commonly used core types at the root level
pub use gatehouse_core::{
    Account, AccountId, AccountSummary, ConfirmationToken, CredentialCheck, Email, EmailError,
    LockoutPolicy, LockoutState, Password, PasswordError, PasswordPolicy, PasswordRuleViolation,
    SessionIdentity, SessionView, Username, UsernameError,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use gatehouse_core::ports::*;
}

// Re-export port traits at root level
pub use gatehouse_core::{
    AccountStore, AccountStoreError, CredentialHasher, CredentialHasherError, EmailClient,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use gatehouse_application::*;
}

// Re-export use cases at root level
pub use gatehouse_application::{
    ConfirmError, ConfirmUseCase, LoginError, LoginUseCase, RegisterError, RegisterUseCase,
    RegistrationViolation,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use gatehouse_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use gatehouse_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use gatehouse_adapters::email::*;
    }

    /// Credential hashing and JWT utilities
    pub mod security {
        pub use gatehouse_adapters::security::*;
    }

    /// Configuration
    pub mod config {
        pub use gatehouse_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use gatehouse_adapters::{
    Argon2CredentialHasher, MockEmailClient, PostmarkEmailClient, SigningKey, SigningKeys,
    TokenIssuer, TokenVerifier,
    persistence::{InMemoryAccountStore, PostgresAccountStore},
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use gatehouse_service::{AuthService, ServiceOptions, configure_postgresql, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
