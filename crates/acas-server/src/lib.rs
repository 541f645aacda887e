//! HTTP server for the anchored content store.
//!
//! Exposes the dispatcher as a single framed `POST /v1/invoke` endpoint,
//! plus JSON health and info endpoints.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::AppState;
pub use server::AcasServer;
