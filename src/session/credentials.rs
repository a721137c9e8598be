// Session credential storage

use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Cookie carrying the API session
pub const SESSION_COOKIE: &str = "connect.sid";

/// Named credential storage (cookie jar)
pub trait CredentialStore: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;

    fn set(&self, name: &str, value: String);

    /// Remove a credential. Clearing one that is not set is a no-op.
    fn clear(&self, name: &str);
}

/// Concurrent in-memory credential store
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    values: Arc<DashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one credential
    pub fn with_credential(name: &str, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(name, value.into());
        store
    }

}

impl CredentialStore for SessionStore {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).map(|entry| entry.value().clone())
    }

    fn set(&self, name: &str, value: String) {
        self.values.insert(name.to_string(), value);
    }

    fn clear(&self, name: &str) {
        if self.values.remove(name).is_some() {
            debug!(credential = name, "Credential cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let store = SessionStore::new();
        assert_eq!(store.get(SESSION_COOKIE), None);

        store.set(SESSION_COOKIE, "s%3Aabc".to_string());
        assert_eq!(store.get(SESSION_COOKIE).as_deref(), Some("s%3Aabc"));

        store.clear(SESSION_COOKIE);
        assert_eq!(store.get(SESSION_COOKIE), None);

        // Clearing twice is harmless
        store.clear(SESSION_COOKIE);
        assert_eq!(store.get(SESSION_COOKIE), None);
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::with_credential(SESSION_COOKIE, "token");
        let other = store.clone();
        other.clear(SESSION_COOKIE);
        assert_eq!(store.get(SESSION_COOKIE), None);
    }
}
