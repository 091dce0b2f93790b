//! Coupon value types and discount arithmetic.

use serde::{Deserialize, Serialize};

use super::CouponCode;

/// How a coupon's `discount` magnitude is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// `discount` is a proportion of the cart total, in percent.
    Percentage,
    /// `discount` is an absolute currency amount subtracted from the
    /// total.
    Fixed,
}

/// A named discount rule applied to a cart's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// Normalized discount code.
    pub code: CouponCode,
    /// Human-readable text; not used in business logic.
    pub description: String,
    /// Discount magnitude, interpreted according to `kind`.
    pub discount: f64,
    /// Selects percentage or fixed interpretation of `discount`.
    #[serde(rename = "type")]
    pub kind: DiscountKind,
}

impl Coupon {
    /// Creates a coupon, normalizing the code.
    #[inline]
    #[must_use]
    pub fn new<C, D>(code: C, description: D, discount: f64, kind: DiscountKind) -> Self
    where
        C: AsRef<str>,
        D: Into<String>,
    {
        Self {
            code: CouponCode::new(code),
            description: description.into(),
            discount,
            kind,
        }
    }

    /// Returns the currency amount this coupon takes off the given
    /// subtotal.
    ///
    /// A fixed discount is capped at the subtotal and a percentage
    /// discount never exceeds it, so the result is always within
    /// `[0, subtotal]`.
    #[inline]
    #[must_use]
    pub fn discount_on(&self, subtotal: f64) -> f64 {
        let amount = match self.kind {
            DiscountKind::Percentage => subtotal * self.discount / 100.0,
            DiscountKind::Fixed => self.discount,
        };
        amount.min(subtotal).max(0.0)
    }

    /// Returns the subtotal with this coupon's discount applied.
    #[inline]
    #[must_use]
    pub fn apply_to(&self, subtotal: f64) -> f64 {
        subtotal - self.discount_on(subtotal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_discount_on_subtotal() {
        let coupon = Coupon::new("WELCOME10", "10% off", 10.0, DiscountKind::Percentage);
        assert!((coupon.discount_on(2000.0) - 200.0).abs() < f64::EPSILON);
        assert!((coupon.apply_to(2000.0) - 1800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fixed_discount_subtracts_flat_amount() {
        let coupon = Coupon::new("SAVE500", "Flat 500 off", 500.0, DiscountKind::Fixed);
        assert!((coupon.apply_to(2000.0) - 1500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fixed_discount_is_capped_at_subtotal() {
        let coupon = Coupon::new("SAVE500", "Flat 500 off", 500.0, DiscountKind::Fixed);
        assert!((coupon.discount_on(300.0) - 300.0).abs() < f64::EPSILON);
        assert!(coupon.apply_to(300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn oversized_percentage_never_goes_negative() {
        let coupon = Coupon::new("BROKEN", "misconfigured", 150.0, DiscountKind::Percentage);
        assert!(coupon.apply_to(100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn discount_on_zero_subtotal_is_zero() {
        let coupon = Coupon::new("WELCOME10", "10% off", 10.0, DiscountKind::Percentage);
        assert!(coupon.discount_on(0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn kind_serializes_lowercase_under_type_key() {
        let coupon = Coupon::new("WELCOME10", "10% off", 10.0, DiscountKind::Percentage);
        let json = serde_json::to_string(&coupon).unwrap();
        assert!(json.contains(r#""type":"percentage""#));

        let fixed = Coupon::new("SAVE500", "Flat 500 off", 500.0, DiscountKind::Fixed);
        let fixed_json = serde_json::to_string(&fixed).unwrap();
        assert!(fixed_json.contains(r#""type":"fixed""#));
    }

    #[test]
    fn deserializes_from_wire_shape() {
        let json = r#"{
            "code": "welcome10",
            "description": "10% off for first-time customers",
            "discount": 10,
            "type": "percentage"
        }"#;
        let coupon: Coupon = serde_json::from_str(json).unwrap();
        assert_eq!(coupon.code.as_inner(), "WELCOME10");
        assert_eq!(coupon.kind, DiscountKind::Percentage);
        assert!((coupon.discount - 10.0).abs() < f64::EPSILON);
    }
}
