//! Selectable line quantity.

use std::fmt;

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Largest quantity a shopper can pick in one add-to-cart action.
pub const MAX_SELECTABLE_QUANTITY: u32 = 10;

/// The fixed option list offered by the quantity selector.
pub const QUANTITY_OPTIONS: [u32; MAX_SELECTABLE_QUANTITY as usize] =
    [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// A quantity from the fixed `1..=10` option list.
///
/// Deserialization goes through [`Quantity::new`], so an out-of-range value
/// can never be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// The quantity every product page starts with.
    pub const ONE: Quantity = Quantity(1);

    /// Validate a selected value.
    pub fn new(value: u32) -> Result<Self, CommerceError> {
        if value == 0 {
            return Err(CommerceError::InvalidQuantity(value));
        }
        if value > MAX_SELECTABLE_QUANTITY {
            return Err(CommerceError::QuantityExceedsLimit(
                value,
                MAX_SELECTABLE_QUANTITY,
            ));
        }
        Ok(Self(value))
    }

    /// Get the raw value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = CommerceError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> u32 {
        q.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
