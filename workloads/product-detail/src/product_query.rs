//! Product query key builder.
//!
//! The product response depends on two inputs: the routed product id and the
//! selected currency. Both go into the cache key, so switching either one is a
//! cache miss and a response priced in another currency is never reused.

use std::time::Duration;

use turbo_commerce::catalog::Product;
use turbo_commerce::{Money, ProductId};
use turbo_query::{DependencyTag, QueryKey, QueryOptions};

use crate::gateway::{GatewayError, ProductGateway};

/// Scope segment of product keys.
pub const PRODUCT_SCOPE: &str = "product";

/// Name segment preceding the currency in product keys.
pub const CURRENCY_PARAM: &str = "selectedCurrency";

/// Inputs of one product lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    product_id: Option<ProductId>,
    currency_code: String,
}

impl ProductQuery {
    /// Capture the current route and currency.
    pub fn new(product_id: Option<ProductId>, currency_code: impl Into<String>) -> Self {
        Self {
            product_id,
            currency_code: currency_code.into(),
        }
    }

    /// The routed product, if resolved.
    pub fn product_id(&self) -> Option<&ProductId> {
        self.product_id.as_ref()
    }

    /// The currency the price is requested in.
    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    /// `["product", <id>, "selectedCurrency", <currency>]`
    pub fn key(&self) -> QueryKey {
        let id = self.product_id.as_ref().map(ProductId::as_str).unwrap_or_default();
        QueryKey::new(PRODUCT_SCOPE)
            .segment(id)
            .param(CURRENCY_PARAM, self.currency_code.as_str())
    }

    /// Fetching is only allowed once the route has a non-empty product id.
    pub fn is_enabled(&self) -> bool {
        self.product_id
            .as_ref()
            .is_some_and(|id| !id.as_str().is_empty())
    }

    /// Query options for this lookup.
    pub fn options(&self, stale_time: Duration) -> QueryOptions {
        QueryOptions::from_tag(DependencyTag::Catalog)
            .enabled(self.is_enabled())
            .with_stale_time(stale_time)
    }

    /// Issue the lookup with the captured inputs.
    pub async fn fetch(&self, gateway: &dyn ProductGateway) -> Result<Product, GatewayError> {
        let product_id = self
            .product_id
            .as_ref()
            .filter(|_| self.is_enabled())
            .ok_or_else(|| GatewayError::Rejected("product id not resolved".to_string()))?;
        gateway.get_product(product_id, &self.currency_code).await
    }
}

/// Product fields with fallbacks, safe to render before data arrives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductFields {
    pub name: String,
    pub picture: String,
    pub description: String,
    pub price: Money,
    pub categories: Vec<String>,
}

impl ProductFields {
    /// Take fields from a response, or fallbacks when there is none.
    pub fn from_response(product: Option<&Product>) -> Self {
        match product {
            Some(p) => Self {
                name: p.name.clone(),
                picture: p.picture.clone(),
                description: p.description.clone(),
                price: p.price_usd.clone(),
                categories: p.categories.clone(),
            },
            None => Self::default(),
        }
    }

    /// Image URL under `base_path`.
    pub fn image_url(&self, base_path: &str) -> String {
        format!("{}{}", base_path, self.picture)
    }
}
