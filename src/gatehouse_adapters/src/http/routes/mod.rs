pub mod confirm;
pub mod error;
pub mod health;
pub mod login;
pub mod logout;
pub mod register;
pub mod session;

pub use confirm::{ConfirmRequest, confirm};
pub use error::AuthApiError;
pub use health::healthz;
pub use login::{LoginRequest, LoginResponseBody, LoginState, login};
pub use logout::logout;
pub use register::{RegisterRequest, RegisterState, register};
pub use session::{SessionState, session, session_partial};
