//! Hooks and hook secrets.
//!
//! ## Example
//!
//! ```rust,ignore
//! let hooks = client.hooks();
//!
//! let hook = hooks
//!     .create(CreateHookRequest::new(
//!         "add-metadata",
//!         "module.exports = function (user, context, cb) { cb(null, { user }); };",
//!         "pre-user-registration",
//!     ))
//!     .await?;
//!
//! // Make the remote secrets exactly match this set
//! hooks
//!     .replace_secrets(hook.id.as_deref().unwrap_or_default(), &HookSecrets::from([
//!         ("API_KEY", "k-123"),
//!     ]))
//!     .await?;
//! ```

mod secrets;

pub use secrets::{HookSecrets, VALUE_NOT_SHOWN};

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::client::Client;

/// Default page size for [`HooksClient::list`].
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Client for hook operations.
///
/// Access via [`Client::hooks()`].
#[derive(Clone)]
pub struct HooksClient {
    client: Client,
}

impl HooksClient {
    /// Creates a new hooks client.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a hook.
    pub async fn create(&self, request: CreateHookRequest) -> Result<Hook, Error> {
        self.client.inner().post(&["hooks"], &request).await
    }

    /// Gets a hook by ID.
    pub async fn get(&self, id: impl AsRef<str>) -> Result<Hook, Error> {
        self.client.inner().get(&["hooks", id.as_ref()]).await
    }

    /// Updates a hook. Only the fields set on the request are changed.
    pub async fn update(
        &self,
        id: impl AsRef<str>,
        request: UpdateHookRequest,
    ) -> Result<Hook, Error> {
        self.client
            .inner()
            .patch(&["hooks", id.as_ref()], &request)
            .await
    }

    /// Deletes a hook.
    pub async fn delete(&self, id: impl AsRef<str>) -> Result<(), Error> {
        self.client.inner().delete(&["hooks", id.as_ref()]).await
    }

    /// Lists hooks.
    ///
    /// ## Example
    ///
    /// ```rust,ignore
    /// let page = client
    ///     .hooks()
    ///     .list()
    ///     .trigger_id("pre-user-registration")
    ///     .enabled(true)
    ///     .page(0)
    ///     .await?;
    ///
    /// for hook in &page.hooks {
    ///     println!("{:?}", hook.name);
    /// }
    /// ```
    pub fn list(&self) -> ListHooksRequest {
        ListHooksRequest {
            client: self.client.clone(),
            page: None,
            per_page: DEFAULT_PER_PAGE,
            include_totals: true,
            fields: Vec::new(),
            include_fields: None,
            enabled: None,
            trigger_id: None,
        }
    }

    /// Reads a hook's secrets. Values come back as [`VALUE_NOT_SHOWN`].
    pub async fn secrets(&self, id: impl AsRef<str>) -> Result<HookSecrets, Error> {
        let secrets: Option<HookSecrets> = self
            .client
            .inner()
            .get(&["hooks", id.as_ref(), "secrets"])
            .await?;
        Ok(secrets.unwrap_or_default())
    }

    /// Adds secrets to a hook. Fails if any key already exists.
    pub async fn create_secrets(
        &self,
        id: impl AsRef<str>,
        secrets: &HookSecrets,
    ) -> Result<(), Error> {
        self.client
            .inner()
            .post::<_, IgnoredAny>(&["hooks", id.as_ref(), "secrets"], secrets)
            .await
            .map(drop)
    }

    /// Overwrites existing secrets of a hook. Fails if any key is missing.
    pub async fn update_secrets(
        &self,
        id: impl AsRef<str>,
        secrets: &HookSecrets,
    ) -> Result<(), Error> {
        self.client
            .inner()
            .patch::<_, IgnoredAny>(&["hooks", id.as_ref(), "secrets"], secrets)
            .await
            .map(drop)
    }

    /// Removes the named secrets from a hook.
    pub async fn remove_secrets<I, K>(&self, id: impl AsRef<str>, keys: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        self.client
            .inner()
            .delete_with_body(&["hooks", id.as_ref(), "secrets"], &keys)
            .await
    }

    /// Makes the hook's secrets exactly `secrets`.
    ///
    /// Reads the current secrets, then creates the new keys, updates the
    /// shared keys and removes the keys no longer wanted, skipping any step
    /// with nothing to do. The first failing step aborts the sequence; the
    /// steps before it stay applied.
    pub async fn replace_secrets(
        &self,
        id: impl AsRef<str>,
        secrets: &HookSecrets,
    ) -> Result<(), Error> {
        let id = id.as_ref();
        let current = self.secrets(id).await?;

        let added = secrets.difference(&current);
        let kept = secrets.intersection(&current);
        let removed = current.difference(secrets);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            hook_id = id,
            added = added.len(),
            updated = kept.len(),
            removed = removed.len(),
            "replacing hook secrets"
        );

        if !added.is_empty() {
            self.create_secrets(id, &added).await?;
        }
        if !kept.is_empty() {
            self.update_secrets(id, &kept).await?;
        }
        if !removed.is_empty() {
            self.remove_secrets(id, removed.keys()).await?;
        }
        Ok(())
    }

    /// Removes every secret of a hook. No request is made past the read when
    /// the hook has none.
    pub async fn remove_all_secrets(&self, id: impl AsRef<str>) -> Result<(), Error> {
        let id = id.as_ref();
        let current = self.secrets(id).await?;
        if current.is_empty() {
            return Ok(());
        }
        self.remove_secrets(id, current.keys()).await
    }
}

impl std::fmt::Debug for HooksClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HooksClient").finish_non_exhaustive()
    }
}

/// A hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hook {
    /// The hook ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The hook name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The hook's source code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// The extensibility point, e.g. `pre-user-registration`.
    #[serde(rename = "triggerId", skip_serializing_if = "Option::is_none")]
    pub trigger_id: Option<String>,
    /// npm dependencies, name to version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, String>>,
    /// Whether the hook runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Request to create a hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateHookRequest {
    /// The hook name.
    pub name: String,
    /// The hook's source code.
    pub script: String,
    /// The extensibility point.
    #[serde(rename = "triggerId")]
    pub trigger_id: String,
    /// npm dependencies, name to version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, String>>,
    /// Whether the hook runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl CreateHookRequest {
    /// Creates a new request.
    pub fn new(
        name: impl Into<String>,
        script: impl Into<String>,
        trigger_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            script: script.into(),
            trigger_id: trigger_id.into(),
            dependencies: None,
            enabled: None,
        }
    }

    /// Adds an npm dependency.
    #[must_use]
    pub fn with_dependency(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.dependencies
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), version.into());
        self
    }

    /// Sets whether the hook runs.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }
}

/// Request to update a hook.
///
/// The ID and trigger of a hook cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateHookRequest {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New source code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// Replacement npm dependencies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, String>>,
    /// Whether the hook runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl UpdateHookRequest {
    /// Creates a new empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the source code.
    #[must_use]
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Adds an npm dependency to the replacement set.
    #[must_use]
    pub fn with_dependency(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.dependencies
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), version.into());
        self
    }

    /// Sets whether the hook runs.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }
}

/// A page of hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookList {
    /// Offset of the first hook on this page.
    #[serde(default)]
    pub start: u32,
    /// Requested page size.
    #[serde(default)]
    pub limit: u32,
    /// Number of hooks on this page.
    #[serde(default)]
    pub length: u32,
    /// Total number of hooks.
    #[serde(default)]
    pub total: u32,
    /// The hooks.
    #[serde(default)]
    pub hooks: Vec<Hook>,
}

impl HookList {
    /// Returns whether more hooks follow this page.
    pub fn has_next(&self) -> bool {
        self.start.saturating_add(self.length) < self.total
    }
}

/// Without totals the API returns a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum HookListResponse {
    Paged(HookList),
    Bare(Vec<Hook>),
}

impl HookListResponse {
    /// Converts the response for the page that was requested. A bare array
    /// has no totals: `total` is set one past a full page so that
    /// [`HookList::has_next`] stays true until a short page arrives.
    fn into_list(self, page: u32, per_page: u32) -> HookList {
        match self {
            HookListResponse::Paged(mut list) => {
                if list.length == 0 {
                    list.length = list.hooks.len() as u32;
                }
                list
            }
            HookListResponse::Bare(hooks) => {
                let start = page.saturating_mul(per_page);
                let length = hooks.len() as u32;
                let mut total = start.saturating_add(length);
                if per_page > 0 && length >= per_page {
                    total = total.saturating_add(1);
                }
                HookList {
                    start,
                    limit: per_page,
                    length,
                    total,
                    hooks,
                }
            }
        }
    }
}

/// Request to list hooks.
pub struct ListHooksRequest {
    client: Client,
    page: Option<u32>,
    per_page: u32,
    include_totals: bool,
    fields: Vec<String>,
    include_fields: Option<bool>,
    enabled: Option<bool>,
    trigger_id: Option<String>,
}

impl ListHooksRequest {
    /// Sets the zero-based page index.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size (default 50).
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Sets whether the response carries totals (default true).
    ///
    /// Without totals the API returns only the hooks. `total` is then a lower
    /// bound: it equals `start + length` on a short page and exceeds it by one
    /// on a full page, so [`HookList::has_next`] means "more may follow".
    #[must_use]
    pub fn include_totals(mut self, include_totals: bool) -> Self {
        self.include_totals = include_totals;
        self
    }

    /// Restricts the response to these fields.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether `fields` are included (true) or excluded (false).
    #[must_use]
    pub fn include_fields(mut self, include: bool) -> Self {
        self.include_fields = Some(include);
        self
    }

    /// Only returns enabled (true) or disabled (false) hooks.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Only returns hooks bound to this trigger.
    #[must_use]
    pub fn trigger_id(mut self, trigger_id: impl Into<String>) -> Self {
        self.trigger_id = Some(trigger_id.into());
        self
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();

        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        query.push(("per_page", self.per_page.to_string()));
        query.push(("include_totals", self.include_totals.to_string()));
        if !self.fields.is_empty() {
            query.push(("fields", self.fields.join(",")));
        }
        if let Some(include) = self.include_fields {
            query.push(("include_fields", include.to_string()));
        }
        if let Some(enabled) = self.enabled {
            query.push(("enabled", enabled.to_string()));
        }
        if let Some(trigger_id) = &self.trigger_id {
            query.push(("triggerId", trigger_id.clone()));
        }

        query
    }

    async fn execute(self) -> Result<HookList, Error> {
        let query = self.query();
        let response: HookListResponse = self
            .client
            .inner()
            .get_with_query(&["hooks"], &query)
            .await?;
        Ok(response.into_list(self.page.unwrap_or(0), self.per_page))
    }
}

impl std::future::IntoFuture for ListHooksRequest {
    type Output = Result<HookList, Error>;
    type IntoFuture = std::pin::Pin<Box<dyn std::future::Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}
