pub mod cookies;
pub mod extract;
pub mod routes;
