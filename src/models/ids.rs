//! Newtype wrappers for cart and coupon identifiers.
//!
//! These prevent accidentally mixing up item identifiers and coupon
//! codes at compile time, and centralize coupon-code normalization.

use serde::{Deserialize, Serialize};

/// Unique identifier for a cart line item (service or product slug).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new identifier from the given string.
    #[inline]
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner string.
    #[inline]
    #[must_use]
    pub fn as_inner(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner string.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for ItemId {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<String> for ItemId {
    #[inline]
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ItemId {
    #[inline]
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// A discount code, normalized on construction.
///
/// The inner string is always uppercase with surrounding whitespace
/// trimmed, so two codes that differ only in case or padding compare
/// equal. Deserialization normalizes as well, making normalization
/// idempotent across round trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct CouponCode(String);

impl CouponCode {
    /// Creates a normalized code from any string-ish input.
    #[inline]
    #[must_use]
    pub fn new<S: AsRef<str>>(code: S) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    /// Returns the normalized code.
    #[inline]
    #[must_use]
    pub fn as_inner(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the normalized code.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for CouponCode {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<String> for CouponCode {
    #[inline]
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for CouponCode {
    #[inline]
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
