//! Shared stores injected into the page.

use std::sync::{Arc, RwLock};

use crate::config::PdpConfig;
use crate::gateway::{CartStore, Navigator, ProductGateway};

/// The shopper's selected currency.
///
/// Cloning shares the same selection. The product page only reads it; the
/// currency switcher owns writes.
#[derive(Debug, Clone)]
pub struct CurrencyStore {
    selected: Arc<RwLock<String>>,
}

impl CurrencyStore {
    /// Create a store with an initial currency code.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            selected: Arc::new(RwLock::new(code.into())),
        }
    }

    /// The selected currency code.
    pub fn selected(&self) -> String {
        self.selected
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Change the selection. Returns `true` if it changed.
    pub fn select(&self, code: impl Into<String>) -> bool {
        let code = code.into();
        let mut selected = self
            .selected
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if *selected == code {
            return false;
        }
        tracing::info!(from = %selected, to = %code, "currency changed");
        *selected = code;
        true
    }
}

/// Everything the product page needs from the rest of the storefront.
#[derive(Clone)]
pub struct StorefrontContext {
    /// Catalog lookup.
    pub products: Arc<dyn ProductGateway>,
    /// Cart owner.
    pub cart: Arc<dyn CartStore>,
    /// Currency selection.
    pub currency: CurrencyStore,
    /// Router.
    pub navigator: Arc<dyn Navigator>,
}

impl StorefrontContext {
    /// Assemble a context.
    pub fn new(
        products: Arc<dyn ProductGateway>,
        cart: Arc<dyn CartStore>,
        currency: CurrencyStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            products,
            cart,
            currency,
            navigator,
        }
    }

    /// Assemble a context whose currency starts at the configured default.
    pub fn from_config(
        config: &PdpConfig,
        products: Arc<dyn ProductGateway>,
        cart: Arc<dyn CartStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::new(
            products,
            cart,
            CurrencyStore::new(config.default_currency.clone()),
            navigator,
        )
    }
}

impl std::fmt::Debug for StorefrontContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontContext")
            .field("currency", &self.currency.selected())
            .finish_non_exhaustive()
    }
}
