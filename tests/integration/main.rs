//! Integration tests for the Auth0 Management API client.
//!
//! These tests run against a real tenant and create, modify and delete hooks
//! and Guardian settings on it. Use a dedicated development tenant.
//!
//! # Running Tests
//!
//! ```bash
//! export AUTH0_DOMAIN=dev-example.eu.auth0.com
//! export AUTH0_CLIENT_ID=...
//! export AUTH0_CLIENT_SECRET=...
//!
//! # Single-threaded, since Guardian settings are tenant-wide
//! cargo test --features integration-tests --test integration -- --test-threads=1
//!
//! # Run a specific test
//! cargo test --features integration-tests --test integration test_replace_secrets -- --nocapture
//! ```
//!
//! # Environment Variables
//!
//! - `AUTH0_DOMAIN`: tenant domain (required)
//! - `AUTH0_TOKEN`: a management API token, or
//! - `AUTH0_CLIENT_ID` + `AUTH0_CLIENT_SECRET`: a machine-to-machine application
//!   authorized for the Management API
//! - `AUTH0_TEST_USER_ID`: an existing user for enrollment ticket tests
//!   (optional; those tests are skipped without it)

mod common;
mod guardian_tests;
mod hook_tests;
