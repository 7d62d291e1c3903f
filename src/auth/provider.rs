//! Pluggable token sources.

use std::{future::Future, pin::Pin, sync::Arc};

use crate::Error;

/// Boxed future returned by [`CredentialsProvider::get_token`].
pub type CredentialsFuture<'a> = Pin<Box<dyn Future<Output = Result<String, Error>> + Send + 'a>>;

/// A user-supplied source of management API tokens.
///
/// Use this when tokens come from somewhere the client does not know about,
/// such as a secret manager or a token broker shared between services. The
/// provider is asked for a token before every request and again after a
/// `401`, so it should do its own caching.
///
/// ## Example
///
/// ```rust
/// use auth0_management::CredentialsProvider;
/// use auth0_management::auth::CredentialsFuture;
///
/// struct EnvTokenProvider(&'static str);
///
/// impl CredentialsProvider for EnvTokenProvider {
///     fn get_token(&self) -> CredentialsFuture<'_> {
///         let var = self.0;
///         Box::pin(async move {
///             std::env::var(var).map_err(|_| {
///                 auth0_management::Error::configuration(format!("{} is not set", var))
///             })
///         })
///     }
/// }
/// ```
pub trait CredentialsProvider: Send + Sync {
    /// Resolves to a bearer token valid for the Management API.
    fn get_token(&self) -> CredentialsFuture<'_>;
}

impl<T: CredentialsProvider + ?Sized> CredentialsProvider for Arc<T> {
    fn get_token(&self) -> CredentialsFuture<'_> {
        (**self).get_token()
    }
}

impl<T: CredentialsProvider + ?Sized> CredentialsProvider for Box<T> {
    fn get_token(&self) -> CredentialsFuture<'_> {
        (**self).get_token()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    struct CountingProvider {
        calls: AtomicU32,
    }

    impl CredentialsProvider for CountingProvider {
        fn get_token(&self) -> CredentialsFuture<'_> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move { Ok(format!("token_{}", n)) })
        }
    }

    #[tokio::test]
    async fn test_provider_is_called_each_time() {
        let provider = CountingProvider {
            calls: AtomicU32::new(0),
        };
        assert_eq!(provider.get_token().await.unwrap(), "token_0");
        assert_eq!(provider.get_token().await.unwrap(), "token_1");
    }

    #[tokio::test]
    async fn test_arc_and_box_delegate() {
        let arc: Arc<dyn CredentialsProvider> = Arc::new(CountingProvider {
            calls: AtomicU32::new(0),
        });
        assert_eq!(arc.get_token().await.unwrap(), "token_0");

        let boxed: Box<dyn CredentialsProvider> = Box::new(CountingProvider {
            calls: AtomicU32::new(5),
        });
        assert_eq!(boxed.get_token().await.unwrap(), "token_5");
    }
}
