//! Walkthrough: build a cart, apply a coupon, persist and reload it.
//!
//! Run: `cargo run --example checkout`

use std::process::ExitCode;

use cartstash::coupons::CouponRegistry;
use cartstash::models::{Cart, CartItem};
use cartstash::session::CartSessionBlocking;
use cartstash::storage::FileStore;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::new(FileStore::default_dir()?)?;
    let session = CartSessionBlocking::new(store);

    // Hydrate from a previous run, or start empty.
    let mut cart = session.load_cart().unwrap_or_default();
    println!(
        "Loaded cart with {} item line(s) (stored snapshot: {})",
        cart.items.len(),
        session.has_stored_cart()
    );

    cart.add_item(CartItem::new(
        "aluminium-window-2x3",
        "Aluminium Window 2x3",
        4500.0,
        2,
    ));
    cart.add_item(CartItem::new(
        "safety-net-balcony",
        "Balcony Safety Net",
        1200.0,
        1,
    ));
    session.save_cart(&cart);

    println!("Subtotal: {:.2}", cart.subtotal());

    let registry = CouponRegistry::builtin();
    let code = "welcome10";
    match registry.validate(code) {
        Some(coupon) => {
            cart.apply_coupon(coupon.code.clone());
            session.save_cart(&cart);
            println!(
                "Applied {} ({}): total {:.2}",
                coupon.code,
                coupon.description,
                cart.total(Some(coupon))
            );
        }
        None => println!("Coupon {code:?} is not valid"),
    }

    // Reload to show the snapshot survives a fresh session.
    let reloaded = session.load_cart().ok_or("expected a stored cart")?;
    println!(
        "Reloaded {} line(s), {} unit(s) in total",
        reloaded.items.len(),
        reloaded.total_quantity()
    );

    session.clear_cart();
    println!("Cleared stored snapshot: {}", !session.has_stored_cart());

    Ok(())
}
