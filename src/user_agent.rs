//! Client identification headers.
//!
//! Every request carries a `User-Agent` and an `Auth0-Client` header. The
//! latter is the base64 encoding of a small JSON document naming the SDK and
//! its build environment, which the tenant logs record for each call.

use std::sync::OnceLock;

use base64::prelude::*;
use reqwest::header::HeaderValue;
use serde::Serialize;

/// SDK name used in both headers.
const SDK_NAME: &str = "auth0-management-rust";

/// SDK version from Cargo.toml.
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum supported Rust version the crate was built against.
const RUST_VERSION: &str = env!("CARGO_PKG_RUST_VERSION");

/// Name of the client telemetry header.
pub(crate) const AUTH0_CLIENT: &str = "auth0-client";

static USER_AGENT: OnceLock<String> = OnceLock::new();
static AUTH0_CLIENT_VALUE: OnceLock<String> = OnceLock::new();

#[derive(Serialize)]
struct ClientInfo {
    name: &'static str,
    version: &'static str,
    env: ClientEnv,
}

#[derive(Serialize)]
struct ClientEnv {
    rust: &'static str,
    os: &'static str,
    arch: &'static str,
}

/// Returns the User-Agent string.
///
/// Format: `auth0-management-rust/0.1.0 (rust/1.92; linux/x86_64)`
pub fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        format!(
            "{}/{} (rust/{}; {}/{})",
            SDK_NAME,
            SDK_VERSION,
            RUST_VERSION,
            os_name(),
            std::env::consts::ARCH,
        )
    })
}

/// Returns the `Auth0-Client` header value.
pub(crate) fn auth0_client() -> HeaderValue {
    let encoded = AUTH0_CLIENT_VALUE.get_or_init(|| {
        let info = ClientInfo {
            name: SDK_NAME,
            version: SDK_VERSION,
            env: ClientEnv {
                rust: RUST_VERSION,
                os: os_name(),
                arch: std::env::consts::ARCH,
            },
        };
        // Serializing a struct of string fields cannot fail.
        let json = serde_json::to_vec(&info).unwrap_or_default();
        BASE64_STANDARD.encode(json)
    });
    // Base64 output is always a valid header value.
    HeaderValue::from_str(encoded).unwrap_or_else(|_| HeaderValue::from_static(SDK_NAME))
}

fn os_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_format() {
        let ua = user_agent();

        let expected_prefix = format!("auth0-management-rust/{} (rust/", SDK_VERSION);
        assert!(ua.starts_with(&expected_prefix));
        assert!(ua.ends_with(&format!("{}/{})", os_name(), std::env::consts::ARCH)));
    }

    #[test]
    fn test_user_agent_cached() {
        assert!(std::ptr::eq(user_agent(), user_agent()));
    }

    #[test]
    fn test_auth0_client_decodes_to_sdk_info() {
        let value = auth0_client();
        let decoded = BASE64_STANDARD.decode(value.as_bytes()).unwrap();
        let info: serde_json::Value = serde_json::from_slice(&decoded).unwrap();

        assert_eq!(
            info,
            serde_json::json!({
                "name": "auth0-management-rust",
                "version": SDK_VERSION,
                "env": {
                    "rust": RUST_VERSION,
                    "os": os_name(),
                    "arch": std::env::consts::ARCH
                }
            })
        );
    }

    #[test]
    fn test_macos_reported_as_darwin() {
        assert_ne!(os_name(), "macos");
    }
}
