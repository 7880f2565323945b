//! Dependency tagging for semantic categorization.

use std::time::Duration;

/// Data dependencies of storefront pages.
///
/// Each tag carries a default freshness window used when a query does not set
/// one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyTag {
    /// Product catalog lookups.
    Catalog,
    /// Custom dependency with name.
    Custom(&'static str),
}

impl DependencyTag {
    /// How long a successful result counts as fresh.
    ///
    /// Anything shown next to a price is always refetched.
    pub fn default_stale_time(&self) -> Duration {
        match self {
            Self::Catalog | Self::Custom(_) => Duration::ZERO,
        }
    }

    /// Get the name of this dependency.
    pub fn name(&self) -> &str {
        match self {
            Self::Catalog => "catalog",
            Self::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for DependencyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
