//! Shopping cart module.
//!
//! Contains the add-to-cart request, cart lines, and the selectable quantity.

mod cart;
mod quantity;

pub use cart::{Cart, CartItem, CartLine};
pub use quantity::{Quantity, MAX_SELECTABLE_QUANTITY, QUANTITY_OPTIONS};
