//! Best-effort cart persistence with schema-version gating.
//!
//! A session owns one cart slot in a [`crate::storage`] backend. Its
//! public operations never raise: persistence is a convenience layered
//! atop an ephemeral browsing session, so a storage hiccup must never
//! crash or block the user flow. Failures are logged via `tracing` and
//! collapsed to `None` / `false` / no-op; the in-memory cart remains
//! the session's source of truth.
//!
//! The async and blocking session types are generated from one macro,
//! mirroring the trait generation in [`crate::storage`].

use serde::{Deserialize, Serialize};

use crate::models::Cart;

/// Storage key identifying the single persisted cart slot.
///
/// There is no multi-cart or multi-user support at this layer; one key
/// names the one slot. Override per session with
/// [`CartSessionBlocking::storage_key`] to isolate slots in tests.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// On-disk representation of a persisted cart: the cart payload plus a
/// write-time `timestamp`.
///
/// The timestamp is write-only metadata. It is stamped on every save
/// and stripped on load, so the domain model never sees it.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCart {
    /// Moment of the last write, in epoch milliseconds.
    timestamp: i64,
    /// The cart payload, flattened alongside the timestamp.
    #[serde(flatten)]
    cart: Cart,
}

/// Returns the current wall-clock time in epoch milliseconds.
fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generates a cart session (async or blocking).
macro_rules! define_session {
    (
        session_name: $session:ident,
        store_trait: $store_trait:ident,
        session_doc: $session_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
    ) => {
        #[doc = $session_doc]
        #[derive(Debug)]
        pub struct $session<S: $store_trait> {
            /// Underlying key-value store.
            store: S,
            /// Storage key identifying this session's cart slot.
            key: String,
            /// Schema version accepted on load; carts stored under any
            /// other version are discarded wholesale.
            version: SchemaVersion,
        }

        impl<S: $store_trait> $session<S> {
            /// Creates a session over the given store, using
            /// [`DEFAULT_STORAGE_KEY`] and [`SchemaVersion::CURRENT`].
            #[inline]
            #[must_use]
            pub fn new(store: S) -> Self {
                Self {
                    store,
                    key: DEFAULT_STORAGE_KEY.to_owned(),
                    version: SchemaVersion::CURRENT,
                }
            }

            /// Overrides the storage key for this session's slot.
            #[inline]
            #[must_use]
            pub fn storage_key<K: Into<String>>(mut self, key: K) -> Self {
                self.key = key.into();
                self
            }

            /// Overrides the schema version this session accepts.
            #[inline]
            #[must_use]
            pub fn schema_version(mut self, version: SchemaVersion) -> Self {
                self.version = version;
                self
            }

            /// Returns the underlying store.
            #[inline]
            #[must_use]
            pub const fn store(&self) -> &S {
                &self.store
            }

            /// Persists a snapshot of the cart, stamped with the
            /// current wall-clock timestamp.
            ///
            /// Best-effort: if the store is unavailable or the write
            /// fails for any reason, the failure is logged and
            /// swallowed. The in-memory cart stays the source of truth
            /// for the current session.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn save_cart(&self, cart: &Cart) {
                if let Err(err) = self.try_save(cart) $( .$await_ext )? {
                    tracing::warn!(error = %err, "failed to persist cart; keeping in-memory state");
                }
            }

            /// Loads the previously persisted cart snapshot, if any.
            ///
            /// Returns `None` when no snapshot exists, when the store
            /// is unavailable, or when the stored data is malformed —
            /// all treated identically to "no stored cart". A snapshot
            /// stored under a different schema version is incompatible:
            /// the stale entry is deleted and `None` returned, so no
            /// partial migration of old-schema data is ever attempted.
            /// On success the write-time timestamp has been stripped.
            #[inline]
            #[must_use]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn load_cart(&self) -> Option<Cart> {
                match self.try_load() $( .$await_ext )? {
                    Ok(cart) => cart,
                    Err(CartStashError::VersionMismatch { found, expected }) => {
                        tracing::debug!(%found, %expected, "discarding stored cart with incompatible schema");
                        if let Err(err) = self.store.remove(&self.key) $( .$await_ext )? {
                            tracing::warn!(error = %err, "failed to evict incompatible stored cart");
                        }
                        None
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to load stored cart");
                        None
                    }
                }
            }

            /// Removes the persisted cart snapshot.
            ///
            /// No-ops if the store is unavailable or no snapshot
            /// exists.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn clear_cart(&self) {
                if let Err(err) = self.store.remove(&self.key) $( .$await_ext )? {
                    tracing::warn!(error = %err, "failed to clear stored cart");
                }
            }

            /// Returns whether a snapshot exists under this session's
            /// key, without validating its shape or version.
            ///
            /// Returns `false` when the store is unavailable.
            #[inline]
            #[must_use]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn has_stored_cart(&self) -> bool {
                match self.store.contains(&self.key) $( .$await_ext )? {
                    Ok(present) => present,
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to check for stored cart");
                        false
                    }
                }
            }

            /// Serializes and writes the stamped cart snapshot.
            $($async_kw)? fn try_save(&self, cart: &Cart) -> Result<()> {
                let record = StoredCart {
                    timestamp: now_millis(),
                    cart: cart.clone(),
                };
                let json = serde_json::to_string(&record)?;
                self.store.write(&self.key, &json) $( .$await_ext )?
            }

            /// Reads, deserializes and version-checks the stored
            /// snapshot.
            $($async_kw)? fn try_load(&self) -> Result<Option<Cart>> {
                let Some(raw) = self.store.read(&self.key) $( .$await_ext )? ? else {
                    return Ok(None);
                };
                let record: StoredCart = serde_json::from_str(&raw)?;
                if record.cart.version != self.version {
                    return Err(CartStashError::VersionMismatch {
                        found: record.cart.version,
                        expected: self.version,
                    });
                }
                Ok(Some(record.cart))
            }
        }
    };
}

#[cfg(feature = "async")]
mod async_session {
    //! Async cart session definition.

    use super::{DEFAULT_STORAGE_KEY, StoredCart, now_millis};
    use crate::error::{CartStashError, Result};
    use crate::models::{Cart, SchemaVersion};
    use crate::storage::KeyValueStore;

    define_session! {
        session_name: CartSession,
        store_trait: KeyValueStore,
        session_doc: "Async cart persistence session.\n\nGeneric over any [`KeyValueStore`]. Every operation completes without\nsuspending — the backends wrap ready values — and never raises;\nfailures degrade to `None` / `false` / no-op.",
        async_kw: async,
        await_kw: await,
    }
}

#[cfg(feature = "blocking")]
mod blocking_session {
    //! Blocking cart session definition.

    use super::{DEFAULT_STORAGE_KEY, StoredCart, now_millis};
    use crate::error::{CartStashError, Result};
    use crate::models::{Cart, SchemaVersion};
    use crate::storage::BlockingKeyValueStore;

    define_session! {
        session_name: CartSessionBlocking,
        store_trait: BlockingKeyValueStore,
        session_doc: "Blocking cart persistence session.\n\nGeneric over any [`BlockingKeyValueStore`]. Operations complete\nsynchronously and never raise; failures degrade to `None` / `false`\n/ no-op.",
    }
}

#[cfg(feature = "async")]
pub use async_session::CartSession;
#[cfg(feature = "blocking")]
pub use blocking_session::CartSessionBlocking;
