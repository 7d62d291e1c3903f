//! Error types for the Management API client.
//!
//! Every fallible operation returns [`Error`]. Remote failures keep the HTTP
//! status and the platform's `errorCode`, so callers can branch on either:
//!
//! ```rust,ignore
//! match client.hooks().get("01234").await {
//!     Ok(hook) => println!("{:?}", hook.name),
//!     Err(e) if e.kind() == ErrorKind::NotFound => println!("gone"),
//!     Err(e) => return Err(e),
//! }
//! ```

#[allow(clippy::module_inception)]
mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for Management API operations.
pub type Result<T> = std::result::Result<T, Error>;
