//! Common test harness for the integration tests.

use anyhow::{Context, Result};
use auth0_management::{Client, CreateHookRequest, Hook, HookSecrets};
use uuid::Uuid;

/// Trigger used for all test hooks.
pub const TEST_TRIGGER: &str = "pre-user-registration";

/// Script used for all test hooks.
pub const TEST_SCRIPT: &str = "function (user, context, callback) { callback(null, { user }); }";

/// Builds a client from the environment, with tracing output enabled.
pub async fn client() -> Result<Client> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth0_management=debug".into()),
        )
        .with_test_writer()
        .try_init();

    Client::from_env()
        .await
        .context("Set AUTH0_DOMAIN and AUTH0_TOKEN or AUTH0_CLIENT_ID/AUTH0_CLIENT_SECRET")
}

/// Returns the user for enrollment tests, if configured.
pub fn test_user_id() -> Option<String> {
    std::env::var("AUTH0_TEST_USER_ID").ok().filter(|v| !v.is_empty())
}

/// A hook created for one test and deleted by `cleanup()`.
pub struct TestHook {
    pub client: Client,
    pub hook: Hook,
}

impl TestHook {
    /// Creates a disabled hook with a unique name and the given secrets.
    pub async fn create(secrets: HookSecrets) -> Result<Self> {
        Self::create_with(client().await?, secrets).await
    }

    /// Like `create`, against the given client. The hook is deleted again
    /// when its secrets cannot be stored.
    pub async fn create_with(client: Client, secrets: HookSecrets) -> Result<Self> {
        let name = format!("test-hook-{}", Uuid::new_v4().simple());

        let hook = client
            .hooks()
            .create(CreateHookRequest::new(name, TEST_SCRIPT, TEST_TRIGGER).with_enabled(false))
            .await
            .context("Failed to create test hook")?;

        let fixture = Self { client, hook };
        if !secrets.is_empty()
            && let Err(err) = fixture.client.hooks().create_secrets(fixture.id(), &secrets).await
        {
            fixture.cleanup().await.ok();
            return Err(err).context("Failed to create test hook secrets");
        }
        Ok(fixture)
    }

    /// The hook ID.
    pub fn id(&self) -> &str {
        self.hook.id.as_deref().unwrap_or_default()
    }

    /// Deletes the hook.
    pub async fn cleanup(self) -> Result<()> {
        self.client
            .hooks()
            .delete(self.id())
            .await
            .context("Failed to delete test hook")
    }
}
