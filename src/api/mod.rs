//! API server implementation
//!
//! Provides the transcript relay endpoint and the health check.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

pub use server::ApiServer;
