//! Static registry of storefront discount codes.
//!
//! The registry is defined once at process start as immutable data and
//! is never persisted; it has no dependency on the cart persistence
//! layer. Lookup is a linear scan — the list holds at most a few tens
//! of codes, so no index is warranted.

use crate::models::{Coupon, CouponCode, DiscountKind};

/// Immutable set of discount codes with normalized exact-match lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponRegistry {
    /// Registered coupons; codes are unique under normalization.
    coupons: Vec<Coupon>,
}

impl CouponRegistry {
    /// Creates a registry from the given coupons.
    ///
    /// Codes are expected to be unique under normalization; if two
    /// entries collide, lookup returns the first.
    #[inline]
    #[must_use]
    pub const fn new(coupons: Vec<Coupon>) -> Self {
        Self { coupons }
    }

    /// The compiled-in storefront coupon set.
    #[inline]
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            Coupon::new(
                "WELCOME10",
                "10% off for first-time customers",
                10.0,
                DiscountKind::Percentage,
            ),
            Coupon::new(
                "SAVE500",
                "Flat 500 off on fabrication orders",
                500.0,
                DiscountKind::Fixed,
            ),
            Coupon::new(
                "MONSOON15",
                "15% off on safety nets this monsoon",
                15.0,
                DiscountKind::Percentage,
            ),
        ])
    }

    /// Looks up a coupon by code.
    ///
    /// Input is normalized (uppercased, trimmed of surrounding
    /// whitespace) and compared exactly; there are no partial matches,
    /// expiry checks, or usage limits. Empty input matches nothing.
    #[inline]
    #[must_use]
    pub fn validate(&self, code: &str) -> Option<&Coupon> {
        let wanted = CouponCode::new(code);
        self.coupons.iter().find(|coupon| coupon.code == wanted)
    }

    /// Iterates over all registered coupons.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> core::slice::Iter<'_, Coupon> {
        self.coupons.iter()
    }

    /// Number of registered coupons.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    /// Returns `true` when the registry holds no coupons.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}

impl<'reg> IntoIterator for &'reg CouponRegistry {
    type Item = &'reg Coupon;
    type IntoIter = core::slice::Iter<'reg, Coupon>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
