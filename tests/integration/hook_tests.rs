//! Hook integration tests.

use auth0_management::hooks::VALUE_NOT_SHOWN;
use auth0_management::{BearerCredentialsConfig, Client, ErrorKind, HookSecrets, UpdateHookRequest};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{TEST_TRIGGER, TestHook};

fn secrets() -> HookSecrets {
    HookSecrets::from([("SECRET1", "value1"), ("SECRET2", "value2")])
}

#[tokio::test]
async fn test_create_and_get_hook() {
    let fixture = TestHook::create(HookSecrets::new()).await.expect("Failed to create hook");

    assert!(!fixture.id().is_empty());
    assert_eq!(fixture.hook.trigger_id.as_deref(), Some(TEST_TRIGGER));

    let hook = fixture.client.hooks().get(fixture.id()).await.expect("Failed to get hook");
    assert_eq!(hook.id, fixture.hook.id);
    assert_eq!(hook.name, fixture.hook.name);

    fixture.cleanup().await.expect("Cleanup should succeed");
}

#[tokio::test]
async fn test_update_hook() {
    let fixture = TestHook::create(HookSecrets::new()).await.expect("Failed to create hook");

    let script =
        "function (user, context, callback) { console.log('hooked!'); callback(null, { user }); }";
    let hook = fixture
        .client
        .hooks()
        .update(fixture.id(), UpdateHookRequest::new().with_script(script))
        .await
        .expect("Failed to update hook");

    assert_eq!(hook.script.as_deref(), Some(script));

    fixture.cleanup().await.expect("Cleanup should succeed");
}

#[tokio::test]
async fn test_delete_hook() {
    let fixture = TestHook::create(HookSecrets::new()).await.expect("Failed to create hook");
    let hooks = fixture.client.hooks();
    let id = fixture.id().to_string();

    hooks.delete(&id).await.expect("Failed to delete hook");

    let err = hooks.get(&id).await.expect_err("Deleted hook should be gone");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_list_hooks() {
    let fixture = TestHook::create(HookSecrets::new()).await.expect("Failed to create hook");

    let list = fixture
        .client
        .hooks()
        .list()
        .fields(["id"])
        .include_fields(true)
        .await
        .expect("Failed to list hooks");

    assert!(list.total >= 1);
    assert!(list.hooks.iter().all(|h| h.name.is_none()));

    fixture.cleanup().await.expect("Cleanup should succeed");
}

#[tokio::test]
async fn test_secrets_are_hidden() {
    let fixture = TestHook::create(secrets()).await.expect("Failed to create hook");

    let actual =
        fixture.client.hooks().secrets(fixture.id()).await.expect("Failed to read secrets");
    assert_eq!(actual.get("SECRET1"), Some(VALUE_NOT_SHOWN));
    assert_eq!(actual.get("SECRET2"), Some(VALUE_NOT_SHOWN));

    fixture.cleanup().await.expect("Cleanup should succeed");
}

#[tokio::test]
async fn test_update_secrets() {
    let fixture = TestHook::create(secrets()).await.expect("Failed to create hook");
    let hooks = fixture.client.hooks();

    hooks
        .update_secrets(fixture.id(), &HookSecrets::from([("SECRET1", "something else")]))
        .await
        .expect("Failed to update secrets");

    let actual = hooks.secrets(fixture.id()).await.expect("Failed to read secrets");
    assert_eq!(actual.get("SECRET1"), Some(VALUE_NOT_SHOWN));
    assert_eq!(actual.get("SECRET2"), Some(VALUE_NOT_SHOWN));

    fixture.cleanup().await.expect("Cleanup should succeed");
}

#[tokio::test]
async fn test_replace_secrets() {
    let fixture = TestHook::create(secrets()).await.expect("Failed to create hook");
    let hooks = fixture.client.hooks();

    hooks
        .replace_secrets(
            fixture.id(),
            &HookSecrets::from([("SECRET1", "something else"), ("SECRET3", "other value")]),
        )
        .await
        .expect("Failed to replace secrets");

    let actual = hooks.secrets(fixture.id()).await.expect("Failed to read secrets");
    assert_eq!(actual.get("SECRET1"), Some(VALUE_NOT_SHOWN));
    assert_eq!(actual.get("SECRET2"), None);
    assert_eq!(actual.get("SECRET3"), Some(VALUE_NOT_SHOWN));

    fixture.cleanup().await.expect("Cleanup should succeed");
}

#[tokio::test]
async fn test_remove_secrets() {
    let fixture = TestHook::create(secrets()).await.expect("Failed to create hook");
    let hooks = fixture.client.hooks();

    hooks.remove_secrets(fixture.id(), ["SECRET1"]).await.expect("Failed to remove secret");

    let actual = hooks.secrets(fixture.id()).await.expect("Failed to read secrets");
    assert_eq!(actual.get("SECRET1"), None);
    assert_eq!(actual.get("SECRET2"), Some(VALUE_NOT_SHOWN));

    fixture.cleanup().await.expect("Cleanup should succeed");
}

#[tokio::test]
async fn test_remove_all_secrets() {
    let fixture = TestHook::create(secrets()).await.expect("Failed to create hook");
    let hooks = fixture.client.hooks();

    hooks.remove_all_secrets(fixture.id()).await.expect("Failed to remove secrets");

    let actual = hooks.secrets(fixture.id()).await.expect("Failed to read secrets");
    assert!(actual.is_empty());

    // Nothing left to remove; must not fail.
    hooks.remove_all_secrets(fixture.id()).await.expect("Second removal should be a no-op");

    fixture.cleanup().await.expect("Cleanup should succeed");
}

#[tokio::test]
async fn test_fixture_deletes_hook_when_secrets_fail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/hooks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "01HOOK",
            "triggerId": TEST_TRIGGER,
            "enabled": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v2/hooks/01HOOK/secrets"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "statusCode": 400,
            "error": "Bad Request",
            "message": "Payload validation error"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/hooks/01HOOK"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder()
        .url(server.uri())
        .insecure()
        .credentials(BearerCredentialsConfig::new("test_token"))
        .build()
        .await
        .expect("Failed to build client");

    let result = TestHook::create_with(client, secrets()).await;
    assert!(result.is_err());
}
