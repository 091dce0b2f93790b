//! In-memory store backend for tests and ephemeral sessions.
//!
//! Provides [`InMemoryStore`], a thread-safe in-memory implementation
//! of the store traits. Ideal for unit and integration tests where
//! file I/O is undesirable.

use std::collections::HashMap;
use std::sync::Mutex;

#[cfg(feature = "async")]
use core::future::{self, Future};

use crate::error::{CartStashError, Result};

/// Thread-safe in-memory key-value store.
///
/// This type implements both [`super::KeyValueStore`] (async) and
/// [`super::BlockingKeyValueStore`] (blocking) traits, providing a
/// zero-setup backend for tests.
///
/// # Example
///
/// ```rust
/// use cartstash::storage::InMemoryStore;
/// use cartstash::session::CartSessionBlocking;
///
/// let session = CartSessionBlocking::new(InMemoryStore::new());
/// assert!(session.load_cart().is_none());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// All entries behind a single mutex for thread-safe interior
    /// mutability.
    inner: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> Result<R> {
        let mut inner = self.inner.lock().map_err(|err| lock_error(&err))?;
        Ok(f(&mut inner))
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> CartStashError {
    CartStashError::Storage(err.to_string().into())
}

// ── BlockingKeyValueStore implementation ────────────────────────────────

#[cfg(feature = "blocking")]
impl super::BlockingKeyValueStore for InMemoryStore {
    #[inline]
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.with_lock(|map| map.get(key).cloned())
    }

    #[inline]
    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.with_lock(|map| {
            let _prev = map.insert(key.to_owned(), value.to_owned());
        })
    }

    #[inline]
    fn remove(&self, key: &str) -> Result<()> {
        self.with_lock(|map| {
            let _prev = map.remove(key);
        })
    }

    #[inline]
    fn contains(&self, key: &str) -> Result<bool> {
        self.with_lock(|map| map.contains_key(key))
    }
}

// ── KeyValueStore (async) implementation ────────────────────────────────

#[cfg(feature = "async")]
impl super::KeyValueStore for InMemoryStore {
    #[inline]
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send {
        future::ready(self.with_lock(|map| map.get(key).cloned()))
    }

    #[inline]
    fn write(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.with_lock(|map| {
            let _prev = map.insert(key.to_owned(), value.to_owned());
        }))
    }

    #[inline]
    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.with_lock(|map| {
            let _prev = map.remove(key);
        }))
    }

    #[inline]
    fn contains(&self, key: &str) -> impl Future<Output = Result<bool>> + Send {
        future::ready(self.with_lock(|map| map.contains_key(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Blocking tests ─────────────────────────────────────────────────

    #[cfg(feature = "blocking")]
    mod blocking {
        use super::*;
        use crate::storage::BlockingKeyValueStore;

        #[test]
        fn read_absent_key_is_none() {
            let store = InMemoryStore::new();
            assert!(store.read("cart").unwrap().is_none());
        }

        #[test]
        fn write_then_read_round_trips() {
            let store = InMemoryStore::new();
            store.write("cart", r#"{"version":1}"#).unwrap();
            assert_eq!(store.read("cart").unwrap().as_deref(), Some(r#"{"version":1}"#));
        }

        #[test]
        fn write_replaces_previous_value() {
            let store = InMemoryStore::new();
            store.write("cart", "old").unwrap();
            store.write("cart", "new").unwrap();
            assert_eq!(store.read("cart").unwrap().as_deref(), Some("new"));
        }

        #[test]
        fn remove_drops_the_entry() {
            let store = InMemoryStore::new();
            store.write("cart", "value").unwrap();
            store.remove("cart").unwrap();
            assert!(store.read("cart").unwrap().is_none());
        }

        #[test]
        fn remove_absent_key_is_ok() {
            let store = InMemoryStore::new();
            store.remove("never-written").unwrap();
        }

        #[test]
        fn contains_tracks_presence() {
            let store = InMemoryStore::new();
            assert!(!store.contains("cart").unwrap());
            store.write("cart", "value").unwrap();
            assert!(store.contains("cart").unwrap());
            store.remove("cart").unwrap();
            assert!(!store.contains("cart").unwrap());
        }

        #[test]
        fn keys_are_independent_slots() {
            let store = InMemoryStore::new();
            store.write("cart", "a").unwrap();
            store.write("wishlist", "b").unwrap();
            store.remove("cart").unwrap();
            assert_eq!(store.read("wishlist").unwrap().as_deref(), Some("b"));
        }
    }

    // ── Async tests ────────────────────────────────────────────────────

    #[cfg(feature = "async")]
    mod async_tests {
        use super::*;
        use crate::storage::KeyValueStore;

        #[tokio::test]
        async fn write_then_read_round_trips() {
            let store = InMemoryStore::new();
            store.write("cart", "value").await.unwrap();
            assert_eq!(store.read("cart").await.unwrap().as_deref(), Some("value"));
        }

        #[tokio::test]
        async fn remove_and_contains() {
            let store = InMemoryStore::new();
            store.write("cart", "value").await.unwrap();
            assert!(store.contains("cart").await.unwrap());
            store.remove("cart").await.unwrap();
            assert!(!store.contains("cart").await.unwrap());
        }
    }
}
