//! Schema version tag for persisted carts.

use serde::{Deserialize, Serialize};

/// Integer tag distinguishing incompatible shapes of persisted cart
/// data across releases.
///
/// Bumped whenever the cart's stored shape changes incompatibly; all
/// previously stored carts are then discarded wholesale on next load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaVersion(u32);

impl SchemaVersion {
    /// The schema version this build reads and writes.
    pub const CURRENT: Self = Self(1);

    /// Creates a version tag from a raw integer.
    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw integer value.
    #[inline]
    #[must_use]
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for SchemaVersion {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for SchemaVersion {
    #[inline]
    fn from(value: u32) -> Self {
        Self(value)
    }
}
