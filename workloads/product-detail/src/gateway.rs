//! Collaborators the product page talks to.
//!
//! The page never owns the catalog, the cart or the router. It reads from
//! them and asks the cart owner to add items through [`CartStore::add_item`].

use async_trait::async_trait;
use turbo_commerce::cart::{Cart, CartItem};
use turbo_commerce::catalog::Product;
use turbo_commerce::ProductId;

/// Error raised by a gateway call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Product lookup.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Fetch a product with its price in `currency_code`.
    async fn get_product(
        &self,
        product_id: &ProductId,
        currency_code: &str,
    ) -> Result<Product, GatewayError>;
}

/// Shared cart owned outside the page.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Current cart contents.
    fn cart(&self) -> Cart;

    /// Add an item. Either the whole request is applied or none of it.
    async fn add_item(&self, item: CartItem) -> Result<(), GatewayError>;
}

/// Client-side router.
pub trait Navigator: Send + Sync {
    /// Move to `destination`. Fire-and-forget.
    fn push(&self, destination: &str);
}
