//! E-commerce domain types for the TurboCommerce storefront.
//!
//! - **Catalog**: the product record served by the catalog gateway
//! - **Cart**: add-to-cart requests, cart lines, selectable quantities
//! - **Money**: unit/nano prices with display formatting
//!
//! # Example
//!
//! ```rust
//! use turbo_commerce::prelude::*;
//!
//! let product = Product::new("OLJCESPC7Z", "Explorascope", Money::new("USD", 101, 960_000_000))
//!     .with_category("telescopes");
//!
//! let mut cart = Cart::new();
//! cart.apply(&CartItem::new(product.id.clone(), Quantity::new(3).unwrap()));
//! assert_eq!(cart.item_count(), 3);
//! assert_eq!(product.price_usd.display(), "$101.96");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{currency_symbol, Money};

    pub use crate::catalog::Product;

    pub use crate::cart::{Cart, CartItem, CartLine, Quantity, QUANTITY_OPTIONS};
}
