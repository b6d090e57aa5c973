pub mod account_store;
pub mod credential_hasher;
pub mod email_client;
