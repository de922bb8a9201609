//! Predicate registry backing the `custom` extension keyword.
//!
//! Some constraints cannot be written in the declarative vocabulary at
//! all ("this string is a parseable URL in our allow-list", "this value
//! satisfies a host-side invariant"). For those, a builder registers a
//! predicate function here and emits `{"custom": [key, ...args]}` into the
//! document; the engine adapter resolves the key back to the predicate at
//! validate time.
//!
//! The registry is an append-only table behind a clonable handle. Tests
//! and embedders can create isolated tables with [`ValidatorRegistry::new`];
//! the free builder functions use the process-wide
//! [`ValidatorRegistry::shared`] table. Keys come from one process-wide
//! counter, so they never collide — not within a registry, not across
//! registries, not across concurrently authored schema trees.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

use serde_json::Value;

static KEY_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Context handed to a predicate alongside the data value.
#[derive(Debug, Clone, Copy)]
pub struct PredicateContext<'a> {
    /// Auxiliary arguments from the `custom` keyword (everything after
    /// the registry key).
    pub args: &'a [Value],
    /// The schema document the `custom` keyword sits in.
    pub parent: &'a Value,
    /// Location of the data value within the instance being validated
    /// (a JSON Pointer; empty at the root).
    pub instance_path: &'a str,
}

/// A registered check: `true` means the value passes.
pub type Predicate = dyn Fn(&Value, &PredicateContext<'_>) -> bool + Send + Sync;

/// Clonable handle to an append-only predicate table.
///
/// Cloning the handle shares the table; entries live for the process
/// lifetime (there is no removal).
///
/// # Examples
///
/// ```
/// use fluent_schema_core::ValidatorRegistry;
///
/// let registry = ValidatorRegistry::new();
/// let key = registry.register(|value, _ctx| value.is_string());
/// assert!(registry.contains(&key));
///
/// let predicate = registry.get(&key).unwrap();
/// let ctx_args = [];
/// let parent = serde_json::json!({});
/// let ctx = fluent_schema_core::PredicateContext {
///     args: &ctx_args,
///     parent: &parent,
///     instance_path: "",
/// };
/// assert!(predicate.as_ref()(&serde_json::json!("ok"), &ctx));
/// ```
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    inner: Arc<RwLock<HashMap<String, Arc<Predicate>>>>,
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("len", &self.len())
            .finish()
    }
}

impl ValidatorRegistry {
    /// Creates an isolated, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle to the process-wide registry used by the free
    /// builder functions ([`string()`](crate::string), …).
    pub fn shared() -> ValidatorRegistry {
        static SHARED: OnceLock<ValidatorRegistry> = OnceLock::new();
        SHARED.get_or_init(ValidatorRegistry::new).clone()
    }

    /// Registers a predicate under a freshly generated key and returns
    /// the key.
    ///
    /// Keys are unique per call for the whole process lifetime; a
    /// collision is a broken contract, not a recoverable error, and
    /// panics.
    pub fn register<F>(&self, predicate: F) -> String
    where
        F: Fn(&Value, &PredicateContext<'_>) -> bool + Send + Sync + 'static,
    {
        let key = format!("custom_{}", KEY_COUNTER.fetch_add(1, Ordering::Relaxed));
        let previous = self
            .inner
            .write()
            .expect("validator registry lock poisoned")
            .insert(key.clone(), Arc::new(predicate));
        assert!(previous.is_none(), "validator key collision: {key}");
        tracing::debug!(key = %key, "registered custom validator");
        key
    }

    /// Looks up a predicate by key.
    pub fn get(&self, key: &str) -> Option<Arc<Predicate>> {
        self.inner
            .read()
            .expect("validator registry lock poisoned")
            .get(key)
            .cloned()
    }

    /// Whether a predicate is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.inner
            .read()
            .expect("validator registry lock poisoned")
            .contains_key(key)
    }

    /// Number of registered predicates.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .expect("validator registry lock poisoned")
            .len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn ctx<'a>(parent: &'a Value) -> PredicateContext<'a> {
        PredicateContext {
            args: &[],
            parent,
            instance_path: "",
        }
    }

    #[test]
    fn test_register_generates_distinct_keys() {
        let registry = ValidatorRegistry::new();
        let a = registry.register(|_, _| true);
        let b = registry.register(|_, _| false);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_keys_unique_across_registries() {
        let first = ValidatorRegistry::new();
        let second = ValidatorRegistry::new();
        let a = first.register(|_, _| true);
        let b = second.register(|_, _| true);
        assert_ne!(a, b, "the key counter is process-wide");
    }

    #[test]
    fn test_clone_shares_the_table() {
        let registry = ValidatorRegistry::new();
        let handle = registry.clone();
        let key = handle.register(|_, _| true);
        assert!(registry.contains(&key));
    }

    #[test]
    fn test_predicate_is_invoked_with_value() {
        let registry = ValidatorRegistry::new();
        let key = registry.register(|value, _| value.as_i64() == Some(42));

        let predicate = registry.get(&key).unwrap();
        let parent = json!({});
        assert!(predicate.as_ref()(&json!(42), &ctx(&parent)));
        assert!(!predicate.as_ref()(&json!(41), &ctx(&parent)));
    }

    #[test]
    fn test_get_missing_key() {
        let registry = ValidatorRegistry::new();
        assert!(registry.get("custom_never_issued").is_none());
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = ValidatorRegistry::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || registry.register(|_, _| true))
            })
            .collect();

        let keys: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let mut unique = keys.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), keys.len());
        assert_eq!(registry.len(), 8);
    }
}
