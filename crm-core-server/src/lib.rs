//! HTTP server of the CRM
//!
//! Wires configuration, authentication, the per-request unit of work and the
//! services into an axum [`Router`](axum::Router).

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

pub use config::{ConfigError, ServerConfig};
pub use error::{AppError, AppResult};
pub use routes::create_router;
pub use state::AppState;
