//! Validation endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::ValidationHandlers;
pub use routes::routes;
