//! Medidoc API server library.
//!
//! Exposes config, state, error handling, middleware and routes so the
//! binary entrypoint and the integration tests build the same application.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod sessions;
pub mod state;
