//! Hook secrets and the set operations used to reconcile them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Placeholder the API returns in place of every secret value.
pub const VALUE_NOT_SHOWN: &str = "_VALUE_NOT_SHOWN_";

/// A hook's secrets: a mapping from secret name to value.
///
/// Values are write-only on the remote side; secrets read back from the API
/// carry [`VALUE_NOT_SHOWN`] as their value. `Debug` output shows keys only.
///
/// ## Example
///
/// ```rust
/// use auth0_management::HookSecrets;
///
/// let current = HookSecrets::from([("A", "1"), ("B", "2")]);
/// let wanted = HookSecrets::from([("B", "3"), ("C", "4")]);
///
/// // New keys, keys to overwrite, keys to drop.
/// assert_eq!(wanted.difference(&current), HookSecrets::from([("C", "4")]));
/// assert_eq!(wanted.intersection(&current), HookSecrets::from([("B", "3")]));
/// assert_eq!(current.difference(&wanted), HookSecrets::from([("A", "1")]));
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HookSecrets(BTreeMap<String, String>);

impl HookSecrets {
    /// Creates an empty set of secrets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a secret, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Inserts a secret.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Removes a secret, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Returns whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of secrets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no secrets.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Secret names, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Secret entries, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Secrets of `self` whose keys are absent from `other`.
    ///
    /// Values are taken from `self`. Neither input is modified.
    pub fn difference(&self, other: &HookSecrets) -> HookSecrets {
        self.filtered(|key| !other.contains_key(key))
    }

    /// Secrets of `self` whose keys are also present in `other`.
    ///
    /// Values are taken from `self`. Neither input is modified.
    pub fn intersection(&self, other: &HookSecrets) -> HookSecrets {
        self.filtered(|key| other.contains_key(key))
    }

    fn filtered(&self, keep: impl Fn(&str) -> bool) -> HookSecrets {
        self.0
            .iter()
            .filter(|(key, _)| keep(key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl std::fmt::Debug for HookSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for HookSecrets
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for HookSecrets
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for HookSecrets {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl From<HookSecrets> for BTreeMap<String, String> {
    fn from(secrets: HookSecrets) -> Self {
        secrets.0
    }
}

impl IntoIterator for HookSecrets {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Extend<(String, String)> for HookSecrets {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    fn secrets() -> impl Strategy<Value = HookSecrets> {
        prop::collection::btree_map("[A-E]{1,2}", "[a-z]{0,3}", 0..8).prop_map(HookSecrets::from)
    }

    proptest! {
        #[test]
        fn self_laws(a in secrets()) {
            prop_assert_eq!(a.intersection(&a), a.clone());
            prop_assert!(a.difference(&a).is_empty());
            prop_assert_eq!(a.difference(&HookSecrets::new()), a.clone());
            prop_assert!(a.intersection(&HookSecrets::new()).is_empty());
        }

        #[test]
        fn membership(a in secrets(), b in secrets()) {
            let diff = a.difference(&b);
            let inter = a.intersection(&b);

            for key in a.keys().chain(b.keys()) {
                let in_a = a.contains_key(key);
                let in_b = b.contains_key(key);
                prop_assert_eq!(diff.contains_key(key), in_a && !in_b);
                prop_assert_eq!(inter.contains_key(key), in_a && in_b);
            }
            for (key, value) in diff.iter().chain(inter.iter()) {
                prop_assert_eq!(a.get(key), Some(value));
            }
        }

        #[test]
        fn partition(a in secrets(), b in secrets()) {
            let diff = a.difference(&b);
            let inter = a.intersection(&b);

            prop_assert!(diff.intersection(&inter).is_empty());
            prop_assert_eq!(diff.len() + inter.len(), a.len());
        }

        #[test]
        fn idempotent(a in secrets(), b in secrets()) {
            let diff = a.difference(&b);
            let inter = a.intersection(&b);

            prop_assert_eq!(diff.difference(&b), diff.clone());
            prop_assert_eq!(inter.intersection(&b), inter.clone());
        }
    }
}
