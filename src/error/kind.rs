//! Error kind enumeration for categorizing SDK errors.

/// Categorization of SDK errors.
///
/// Most variants correspond to an HTTP status returned by the Management
/// API. The rest describe failures on the client side of the wire.
///
/// ## Retriable vs Non-Retriable
///
/// | ErrorKind         | HTTP      | Retriable |
/// |-------------------|-----------|-----------|
/// | `InvalidArgument` | 400       | No        |
/// | `Unauthorized`    | 401       | No        |
/// | `Forbidden`       | 403       | No        |
/// | `NotFound`        | 404       | No        |
/// | `Conflict`        | 409       | No        |
/// | `RateLimited`     | 429       | Yes       |
/// | `Internal`        | 500       | No        |
/// | `Unavailable`     | 502, 503  | Yes       |
/// | `Timeout`         | 504       | Yes       |
/// | `Connection`      | -         | Yes       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The management token is missing, expired or invalid.
    ///
    /// HTTP: 401 Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    /// The token lacks the scope required by the endpoint.
    ///
    /// HTTP: 403 Forbidden
    #[error("forbidden")]
    Forbidden,

    /// The requested resource does not exist.
    ///
    /// HTTP: 404 Not Found
    #[error("not found")]
    NotFound,

    /// The request payload or a path argument was rejected.
    ///
    /// HTTP: 400 Bad Request
    #[error("invalid argument")]
    InvalidArgument,

    /// The request conflicts with existing state (e.g. a secret that
    /// already exists).
    ///
    /// HTTP: 409 Conflict
    #[error("conflict")]
    Conflict,

    /// The tenant's rate limit was exceeded.
    ///
    /// HTTP: 429 Too Many Requests
    ///
    /// **Retriable.** Use `Error::retry_after()` for the recommended delay.
    #[error("rate limited")]
    RateLimited,

    /// The service is temporarily unavailable.
    ///
    /// HTTP: 502 Bad Gateway, 503 Service Unavailable
    #[error("service unavailable")]
    Unavailable,

    /// The request timed out, on either side of the wire.
    ///
    /// HTTP: 504 Gateway Timeout
    #[error("timeout")]
    Timeout,

    /// Internal server error.
    ///
    /// HTTP: 500 Internal Server Error
    #[error("internal error")]
    Internal,

    /// Connection error (DNS, TLS handshake, network unreachable).
    #[error("connection error")]
    Connection,

    /// The response could not be decoded.
    #[error("protocol error")]
    Protocol,

    /// Invalid client configuration (bad URL, missing credentials).
    #[error("configuration error")]
    Configuration,

    /// Unknown or unexpected error.
    #[error("unknown error")]
    Unknown,
}

impl ErrorKind {
    /// Returns `true` if this error kind is generally safe to retry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use auth0_management::ErrorKind;
    ///
    /// assert!(ErrorKind::RateLimited.is_retriable());
    /// assert!(!ErrorKind::NotFound.is_retriable());
    /// ```
    #[inline]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Unavailable
                | ErrorKind::Timeout
                | ErrorKind::RateLimited
                | ErrorKind::Connection
        )
    }

    /// Creates an `ErrorKind` from an HTTP status code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidArgument,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            429 => ErrorKind::RateLimited,
            500 => ErrorKind::Internal,
            502 | 503 => ErrorKind::Unavailable,
            504 => ErrorKind::Timeout,
            _ if (400..500).contains(&status) => ErrorKind::InvalidArgument,
            _ if status >= 500 => ErrorKind::Internal,
            _ => ErrorKind::Unknown,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_is_retriable() {
        assert!(ErrorKind::Unavailable.is_retriable());
        assert!(ErrorKind::Timeout.is_retriable());
        assert!(ErrorKind::RateLimited.is_retriable());
        assert!(ErrorKind::Connection.is_retriable());

        assert!(!ErrorKind::Unauthorized.is_retriable());
        assert!(!ErrorKind::Forbidden.is_retriable());
        assert!(!ErrorKind::NotFound.is_retriable());
        assert!(!ErrorKind::InvalidArgument.is_retriable());
        assert!(!ErrorKind::Conflict.is_retriable());
        assert!(!ErrorKind::Internal.is_retriable());
        assert!(!ErrorKind::Protocol.is_retriable());
        assert!(!ErrorKind::Configuration.is_retriable());
        assert!(!ErrorKind::Unknown.is_retriable());
    }

    #[test_case(400, ErrorKind::InvalidArgument)]
    #[test_case(401, ErrorKind::Unauthorized)]
    #[test_case(403, ErrorKind::Forbidden)]
    #[test_case(404, ErrorKind::NotFound)]
    #[test_case(409, ErrorKind::Conflict)]
    #[test_case(422, ErrorKind::InvalidArgument)]
    #[test_case(429, ErrorKind::RateLimited)]
    #[test_case(500, ErrorKind::Internal)]
    #[test_case(501, ErrorKind::Internal)]
    #[test_case(502, ErrorKind::Unavailable)]
    #[test_case(503, ErrorKind::Unavailable)]
    #[test_case(504, ErrorKind::Timeout)]
    #[test_case(200, ErrorKind::Unknown)]
    #[test_case(301, ErrorKind::Unknown)]
    fn test_from_http_status(status: u16, expected: ErrorKind) {
        assert_eq!(ErrorKind::from_http_status(status), expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorKind::Unauthorized), "unauthorized");
        assert_eq!(format!("{}", ErrorKind::NotFound), "not found");
        assert_eq!(format!("{}", ErrorKind::RateLimited), "rate limited");
        assert_eq!(format!("{}", ErrorKind::Unavailable), "service unavailable");
        assert_eq!(format!("{}", ErrorKind::Protocol), "protocol error");
        assert_eq!(format!("{}", ErrorKind::Configuration), "configuration error");
    }

    #[test]
    fn test_error_kind_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ErrorKind::Timeout);
        set.insert(ErrorKind::Unavailable);
        set.insert(ErrorKind::Timeout);
        assert_eq!(set.len(), 2);
    }
}
