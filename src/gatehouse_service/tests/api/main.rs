mod confirm;
mod helpers;
mod login;
mod register;
mod session;
