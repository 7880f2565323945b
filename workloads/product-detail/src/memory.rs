//! In-memory collaborators for local wiring and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use turbo_commerce::cart::{Cart, CartItem};
use turbo_commerce::catalog::Product;
use turbo_commerce::money::FALLBACK_CURRENCY;
use turbo_commerce::ProductId;

use crate::gateway::{CartStore, GatewayError, Navigator, ProductGateway};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Catalog holding USD-priced products and conversion rates.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: HashMap<ProductId, Product>,
    rates: HashMap<String, f64>,
    requests: Mutex<Vec<(ProductId, String)>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product priced in USD.
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.insert(product.id.clone(), product);
        self
    }

    /// Add a conversion rate from USD.
    pub fn with_rate(mut self, currency_code: impl Into<String>, rate: f64) -> Self {
        self.rates.insert(currency_code.into(), rate);
        self
    }

    /// Every lookup received, in order.
    pub fn requests(&self) -> Vec<(ProductId, String)> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl ProductGateway for InMemoryCatalog {
    async fn get_product(
        &self,
        product_id: &ProductId,
        currency_code: &str,
    ) -> Result<Product, GatewayError> {
        lock(&self.requests).push((product_id.clone(), currency_code.to_string()));

        let product = self
            .products
            .get(product_id)
            .ok_or_else(|| GatewayError::NotFound(product_id.to_string()))?;

        let rate = if currency_code == FALLBACK_CURRENCY {
            1.0
        } else {
            *self.rates.get(currency_code).ok_or_else(|| {
                GatewayError::Rejected(format!("unsupported currency {}", currency_code))
            })?
        };

        let mut product = product.clone();
        product.price_usd = product.price_usd.converted(currency_code, rate);
        Ok(product)
    }
}

/// Cart that applies requests locally and can be told to fail.
#[derive(Debug, Default)]
pub struct InMemoryCart {
    cart: Mutex<Cart>,
    requests: Mutex<Vec<CartItem>>,
    failing: AtomicBool,
}

impl InMemoryCart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart with existing contents.
    pub fn with_cart(cart: Cart) -> Self {
        Self {
            cart: Mutex::new(cart),
            ..Self::default()
        }
    }

    /// Make subsequent `add_item` calls fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every add request received, in order, including failed ones.
    pub fn requests(&self) -> Vec<CartItem> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl CartStore for InMemoryCart {
    fn cart(&self) -> Cart {
        lock(&self.cart).clone()
    }

    async fn add_item(&self, item: CartItem) -> Result<(), GatewayError> {
        lock(&self.requests).push(item.clone());
        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("simulated network error".to_string()));
        }
        lock(&self.cart).apply(&item);
        Ok(())
    }
}

/// Navigator that records destinations instead of routing.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Create a navigator with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every destination pushed, in order.
    pub fn visits(&self) -> Vec<String> {
        lock(&self.visits).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, destination: &str) {
        tracing::debug!(destination, "navigate");
        lock(&self.visits).push(destination.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_commerce::cart::Quantity;
    use turbo_commerce::Money;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new()
            .with_product(Product::new("A", "Binoculars", Money::new("USD", 20, 0)))
            .with_rate("EUR", 0.5)
    }

    #[tokio::test]
    async fn test_catalog_converts_price() {
        let product = catalog()
            .get_product(&ProductId::new("A"), "EUR")
            .await
            .unwrap();
        assert_eq!(product.price_usd, Money::new("EUR", 10, 0));
    }

    #[tokio::test]
    async fn test_catalog_unknown_product() {
        let err = catalog()
            .get_product(&ProductId::new("missing"), "USD")
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::NotFound("missing".to_string()));
    }

    #[tokio::test]
    async fn test_catalog_unknown_currency() {
        let err = catalog()
            .get_product(&ProductId::new("A"), "XYZ")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_failing_cart_leaves_contents_untouched() {
        let cart = InMemoryCart::new();
        cart.set_failing(true);
        let item = CartItem::new(ProductId::new("A"), Quantity::new(2).unwrap());

        assert!(cart.add_item(item.clone()).await.is_err());
        assert!(cart.cart().is_empty());
        assert_eq!(cart.requests(), vec![item]);
    }

    #[test]
    fn test_navigator_records() {
        let nav = RecordingNavigator::new();
        nav.push("/cart");
        assert_eq!(nav.visits(), vec!["/cart".to_string()]);
    }
}
