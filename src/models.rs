//! Data models for the storefront cart.
//!
//! This module contains the cart domain model, coupon value types,
//! newtype identifier wrappers, and the persisted-schema version tag.

mod cart;
mod coupon;
mod ids;
mod version;

pub use cart::{Cart, CartItem};
pub use coupon::{Coupon, DiscountKind};
pub use ids::{CouponCode, ItemId};
pub use version::SchemaVersion;
