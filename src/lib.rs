//! Client-side shopping cart persistence with coupon validation.
//!
//! `cartstash` keeps one cart snapshot per browsing session in a
//! pluggable key-value store, gated by a schema version so that
//! incompatible old data is discarded rather than misread, and
//! validates discount codes against a compiled-in registry.
//!
//! Persistence is best-effort by design: every public session
//! operation degrades to `None` / `false` / no-op instead of raising,
//! because losing a convenience cache must never break the user flow.
//!
//! # Quick start
//!
//! ```rust
//! use cartstash::coupons::CouponRegistry;
//! use cartstash::models::{Cart, CartItem};
//! use cartstash::session::CartSessionBlocking;
//! use cartstash::storage::InMemoryStore;
//!
//! let session = CartSessionBlocking::new(InMemoryStore::new());
//!
//! let mut cart = Cart::new();
//! cart.add_item(CartItem::new("glass-partition", "Glass Partition", 7800.0, 1));
//! session.save_cart(&cart);
//!
//! let registry = CouponRegistry::builtin();
//! let coupon = registry.validate("welcome10");
//! assert!((cart.total(coupon) - 7020.0).abs() < 1e-9);
//!
//! assert_eq!(session.load_cart(), Some(cart));
//! ```

pub mod coupons;
pub mod error;
pub mod models;
pub mod session;
pub mod storage;
