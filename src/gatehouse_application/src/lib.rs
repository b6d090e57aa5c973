pub mod use_cases;

pub use use_cases::{
    confirm::{ConfirmError, ConfirmUseCase},
    login::{LoginError, LoginUseCase},
    register::{RegisterError, RegisterUseCase, RegistrationViolation},
};
