//! Quantity selector state.

use turbo_commerce::cart::{Quantity, QUANTITY_OPTIONS};
use turbo_commerce::{CommerceError, ProductId};

/// The selected quantity, tied to the product it was chosen for.
///
/// The selector remembers which product it belongs to so that the quantity
/// snaps back to 1 in the same step that changes the product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantitySelector {
    product_id: Option<ProductId>,
    quantity: Quantity,
}

impl QuantitySelector {
    /// Create a selector at quantity 1 with no product.
    pub fn new() -> Self {
        Self::default()
    }

    /// The options offered to the shopper.
    pub fn options() -> &'static [u32] {
        &QUANTITY_OPTIONS
    }

    /// The selected quantity.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// The product the quantity applies to.
    pub fn product_id(&self) -> Option<&ProductId> {
        self.product_id.as_ref()
    }

    /// Select one of the offered options.
    ///
    /// Values outside the list leave the current selection unchanged.
    pub fn select(&mut self, value: u32) -> Result<Quantity, CommerceError> {
        let quantity = Quantity::new(value)?;
        self.quantity = quantity;
        Ok(quantity)
    }

    /// Track the routed product. Returns `true` when the product changed and
    /// the quantity was reset.
    pub fn on_product_change(&mut self, product_id: Option<ProductId>) -> bool {
        if self.product_id == product_id {
            return false;
        }
        tracing::debug!(
            from = ?self.product_id.as_ref().map(ProductId::as_str),
            to = ?product_id.as_ref().map(ProductId::as_str),
            "product changed, resetting quantity"
        );
        self.product_id = product_id;
        self.quantity = Quantity::ONE;
        true
    }
}
