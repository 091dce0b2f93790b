//! Pluggable key-value stores backing cart persistence.
//!
//! This module defines the [`KeyValueStore`] (async) and
//! [`BlockingKeyValueStore`] (blocking) traits via a shared macro, so
//! the method list is written once, mirroring the session generation
//! in [`crate::session`]. A backend stores opaque string values under
//! string keys; the cart session layers serialization and version
//! gating on top.

#[cfg(feature = "storage-file")]
mod file;
mod memory;

#[cfg(feature = "storage-file")]
pub use file::FileStore;
pub use memory::InMemoryStore;

/// Generates a store trait (async or blocking) with the key-value
/// method list.
///
/// Uses `@methods` to define the method list once, and `@method` to
/// render each method in async (`impl Future + Send`) or blocking
/// (`fn`) style.
macro_rules! define_store {
    // ── Entry points ────────────────────────────────────────────────
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: async_mode,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_store!(@methods async_mode);
        }
    };
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: blocking,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_store!(@methods blocking);
        }
    };

    // ── Single method list (shared between both variants) ───────────
    (@methods $mode:ident) => {
        define_store!(@method $mode, read,
            "Returns the value stored under `key`, or `None` if absent.\n\n# Errors\n\nReturns an error if the backend cannot be read.",
            key: &str, -> Result<Option<String>>);
        define_store!(@method $mode, write,
            "Stores `value` under `key`, replacing any previous value.\n\n# Errors\n\nReturns an error if the backend cannot be written (for example on quota exhaustion or I/O failure).",
            key: &str, value: &str, -> Result<()>);
        define_store!(@method $mode, remove,
            "Removes the value stored under `key`. Removing an absent key is not an error.\n\n# Errors\n\nReturns an error if the backend cannot be written.",
            key: &str, -> Result<()>);
        define_store!(@method $mode, contains,
            "Returns whether a value exists under `key`, without reading it.\n\n# Errors\n\nReturns an error if the backend cannot be read.",
            key: &str, -> Result<bool>);
    };

    // ── Blocking method renderer ────────────────────────────────────
    (@method blocking, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*) -> $ret;
    };

    // ── Async method renderer (returns impl Future + Send) ──────────
    (@method async_mode, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*)
            -> impl core::future::Future<Output = $ret> + Send;
    };
}

#[cfg(feature = "async")]
mod async_store {
    //! Async store trait definition.

    use crate::error::Result;

    define_store! {
        trait_name: KeyValueStore,
        trait_doc: "Async key-value store backing cart persistence.\n\nAll methods take `&self` — implementations should use interior mutability\n(e.g. `Mutex`) for thread-safe mutation.",
        mode: async_mode,
    }
}

#[cfg(feature = "blocking")]
mod blocking_store {
    //! Blocking store trait definition.

    use crate::error::Result;

    define_store! {
        trait_name: BlockingKeyValueStore,
        trait_doc: "Blocking key-value store backing cart persistence.\n\nAll methods take `&self` — implementations should use interior mutability\n(e.g. `Mutex`) for thread-safe mutation.",
        mode: blocking,
    }
}

#[cfg(feature = "async")]
pub use async_store::KeyValueStore;
#[cfg(feature = "blocking")]
pub use blocking_store::BlockingKeyValueStore;
