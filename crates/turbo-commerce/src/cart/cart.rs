//! Cart and line item types.

use std::collections::HashSet;

use crate::cart::Quantity;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// An add-to-cart request.
///
/// Built from the product page's state at the moment the shopper clicks and
/// handed to the cart owner; nothing keeps it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product being added.
    pub product_id: ProductId,
    /// Selected quantity.
    pub quantity: Quantity,
}

impl CartItem {
    /// Create a new request.
    pub fn new(product_id: ProductId, quantity: Quantity) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// A line already in the cart.
///
/// Quantities accumulate across adds, so they are not limited to the
/// selector's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product in this line.
    pub product_id: ProductId,
    /// Total quantity of the product.
    pub quantity: u32,
}

impl CartLine {
    /// Create a new line.
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// A shopping cart as seen by read-only consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Items in the cart.
    pub items: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a request into the cart, adding to an existing line if present.
    pub fn apply(&mut self, item: &CartItem) {
        let added = item.quantity.get();
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|l| l.product_id == item.product_id)
        {
            line.quantity = line.quantity.saturating_add(added);
        } else {
            self.items.push(CartLine::new(item.product_id.clone(), added));
        }
    }

    /// Product ids present in the cart, repeats removed, first-seen order.
    pub fn distinct_product_ids(&self) -> Vec<ProductId> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .filter(|l| seen.insert(&l.product_id))
            .map(|l| l.product_id.clone())
            .collect()
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| i.quantity as u64).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
