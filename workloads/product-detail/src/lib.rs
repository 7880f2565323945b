//! Product detail page for the TurboCommerce storefront.
//!
//! The page is a view-model driven by discrete events:
//! - route changes re-key the product query and reset the quantity
//! - currency changes re-key the product query
//! - "Add To Cart" submits `{productId, quantity}` to the shared cart and
//!   navigates to the cart, or raises an alert on failure
//!
//! Collaborators (catalog, cart, router, currency) are injected through
//! [`StorefrontContext`]; nothing here owns global state.

pub mod alert;
pub mod cart_add;
pub mod config;
pub mod context;
pub mod gateway;
pub mod memory;
pub mod product_query;
pub mod quantity;
pub mod sections;
pub mod telemetry;
pub mod view;

pub use alert::{Alert, DismissTrigger};
pub use cart_add::{
    AddToCartOutcome, CartAddOrchestrator, SkipReason, ADD_TO_CART_FAILED_MESSAGE,
};
pub use config::{LogFormat, PdpConfig};
pub use context::{CurrencyStore, StorefrontContext};
pub use gateway::{CartStore, GatewayError, Navigator, ProductGateway};
pub use product_query::{ProductFields, ProductQuery};
pub use quantity::QuantitySelector;
pub use view::{AdContext, ProductDetail, ProductDetailSnapshot, ViewState};
