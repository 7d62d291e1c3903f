//! Retry configuration for rate limits and transient failures.

use std::time::Duration;

use crate::ErrorKind;

/// Configuration for retrying failed Management API requests.
///
/// Requests that fail with a retriable [`ErrorKind`] are sent again after an
/// exponential backoff with jitter. When the API answers `429 Too Many
/// Requests` with a `Retry-After` or `X-RateLimit-Reset` header, that hint
/// takes precedence over the computed backoff (still capped at `max_delay`).
///
/// ## Default Values
///
/// - `max_retries`: 3
/// - `initial_delay`: 100ms
/// - `max_delay`: 10s
/// - `multiplier`: 2.0
/// - `jitter`: 0.1 (10%)
///
/// ## Example
///
/// ```rust
/// use auth0_management::RetryConfig;
/// use std::time::Duration;
///
/// let config = RetryConfig::new()
///     .with_max_retries(5)
///     .with_max_delay(Duration::from_secs(30));
/// assert!(config.is_enabled());
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,

    /// Backoff before the first retry.
    pub initial_delay: Duration,

    /// Upper bound for any single backoff, including server hints.
    pub max_delay: Duration,

    /// Growth factor between consecutive backoffs.
    pub multiplier: f64,

    /// Relative jitter in `[0.0, 1.0]`.
    pub jitter: f64,

    /// Whether client-side and gateway timeouts are retried.
    pub retry_on_timeout: bool,

    /// Whether connection failures are retried.
    pub retry_on_connection_error: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
            jitter: 0.1,
            retry_on_timeout: true,
            retry_on_connection_error: true,
        }
    }
}

impl RetryConfig {
    /// Creates a new retry configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that never retries.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Sets the maximum number of retries.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff before the first retry.
    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the upper bound for a single backoff.
    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the backoff growth factor, raised to at least `1.0`.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier.max(1.0);
        self
    }

    /// Sets the jitter factor, clamped to `[0.0, 1.0]`.
    #[must_use]
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    /// Sets whether timeouts are retried.
    #[must_use]
    pub fn with_retry_on_timeout(mut self, retry: bool) -> Self {
        self.retry_on_timeout = retry;
        self
    }

    /// Sets whether connection failures are retried.
    #[must_use]
    pub fn with_retry_on_connection_error(mut self, retry: bool) -> Self {
        self.retry_on_connection_error = retry;
        self
    }

    /// Returns `true` if retries are enabled.
    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }

    /// Returns `true` if a request that failed with `kind` after `attempt`
    /// retries should be sent again.
    pub fn should_retry(&self, kind: ErrorKind, attempt: u32) -> bool {
        if attempt >= self.max_retries {
            return false;
        }
        match kind {
            ErrorKind::Timeout => self.retry_on_timeout,
            ErrorKind::Connection => self.retry_on_connection_error,
            kind => kind.is_retriable(),
        }
    }

    /// Backoff before retry number `attempt` (1-based).
    ///
    /// `initial_delay * multiplier^(attempt - 1)`, capped at `max_delay`,
    /// then jittered by up to `jitter` in either direction.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let base = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        let capped = base.min(self.max_delay.as_secs_f64()).max(0.0);

        if self.jitter <= 0.0 {
            return self.to_duration(capped);
        }

        let spread = capped * self.jitter;
        let offset = (fastrand::f64() * 2.0 - 1.0) * spread;
        self.to_duration((capped + offset).max(0.0))
    }

    /// Converts seconds to a `Duration`, falling back to `max_delay` when the
    /// value is not representable.
    fn to_duration(&self, secs: f64) -> Duration {
        Duration::try_from_secs_f64(secs).unwrap_or(self.max_delay)
    }

    /// Backoff before retry `attempt`, preferring a server-provided hint.
    pub(crate) fn delay_with_hint(&self, attempt: u32, hint: Option<Duration>) -> Duration {
        match hint {
            Some(hint) => hint.min(self.max_delay),
            None => self.delay_for_attempt(attempt),
        }
    }
}
