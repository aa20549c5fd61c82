//! Psychometric assessment endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::PsychometricHandlers;
pub use routes::routes;
