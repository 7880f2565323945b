//! Product types.

use std::collections::HashSet;

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// The price field keeps the catalog's historical `priceUsd` name even though
/// the gateway converts it into whatever currency the request asked for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Image file name, relative to the storefront's product image directory.
    #[serde(default)]
    pub picture: String,
    /// Price in the requested currency.
    #[serde(default)]
    pub price_usd: Money,
    /// Category tags. May contain repeats.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Product {
    /// Create a product with an empty description, picture and category list.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            picture: String::new(),
            price_usd: price,
            categories: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the picture file name.
    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = picture.into();
        self
    }

    /// Append a category tag.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Category tags with repeats removed, in first-seen order.
    pub fn distinct_categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.categories
            .iter()
            .filter(|c| seen.insert(c.as_str()))
            .cloned()
            .collect()
    }
}
