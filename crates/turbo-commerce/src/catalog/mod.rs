//! Product catalog module.
//!
//! Contains the read-only product record served by the catalog gateway.

mod product;

pub use product::Product;
