//! Configuration types for the Management API client.
//!
//! This module provides configuration options for:
//! - [`RetryConfig`]: Retry behavior for rate limits and transient failures
//! - [`TlsConfig`]: TLS/SSL settings

mod retry;
mod tls;

pub use retry::RetryConfig;
pub use tls::TlsConfig;
