pub mod account;
pub mod confirmation;
pub mod credential_check;
pub mod email;
pub mod lockout;
pub mod password;
pub mod password_policy;
pub mod session;
pub mod username;
