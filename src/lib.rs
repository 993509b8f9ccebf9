//! Transcript Relay
//!
//! A small HTTP relay that fetches caller-supplied caption URLs with
//! browser-like headers and returns the body to the caller.
//!
//! ## Features
//!
//! - Rotating spoofed User-Agent identities (uniformly random per attempt)
//! - Bounded sequential retry loop with a fixed inter-attempt delay
//! - Permissive CORS for browser frontends
//! - Health check endpoint

pub mod api;
pub mod config;
pub mod error;
pub mod relay;

pub use config::Config;
pub use error::{RelayError, Result};
