//! HTTP API module.
//!
//! This module provides the HTTP server and response types for the
//! mediatrends views.

pub mod server;
pub mod types;

pub use server::{router, start_server};
pub use types::*;
