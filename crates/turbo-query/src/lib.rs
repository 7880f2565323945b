//! Keyed query cache for storefront views.
//!
//! This crate provides:
//! - `QueryKey` - Composite cache identity
//! - `QueryClient` - Shared result cache with in-flight deduplication
//! - `QueryObserver` - A view's binding to its current key
//! - `DependencyTag` - Semantic dependency categories

mod client;
mod dependency;
mod key;
mod observer;

pub use client::*;
pub use dependency::*;
pub use key::*;
pub use observer::*;
