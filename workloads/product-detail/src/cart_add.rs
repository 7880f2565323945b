//! Add-to-cart orchestration.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use turbo_commerce::cart::CartItem;

use crate::gateway::{CartStore, Navigator};

/// The only message a shopper sees when adding to the cart fails.
pub const ADD_TO_CART_FAILED_MESSAGE: &str = "Failed to add item to the cart. Please try again.";

/// Why an add-to-cart click did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The route has no product id yet.
    ProductUnresolved,
    /// Another request is in flight and the in-flight guard is on.
    InFlight,
}

/// Result of one add-to-cart click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddToCartOutcome {
    /// The cart accepted the item and the shopper was sent to the cart.
    Added(CartItem),
    /// The cart rejected the item; `message` is what the shopper sees.
    Failed {
        item: CartItem,
        message: &'static str,
    },
    /// No request was issued.
    Skipped(SkipReason),
}

/// Runs the add-item effect and its success/failure branches.
///
/// Concurrent clicks each issue their own request unless
/// `guard_in_flight` is set.
pub struct CartAddOrchestrator {
    cart: Arc<dyn CartStore>,
    navigator: Arc<dyn Navigator>,
    cart_route: String,
    guard_in_flight: bool,
    in_flight: AtomicUsize,
}

impl CartAddOrchestrator {
    /// Create an orchestrator that navigates to `cart_route` on success.
    pub fn new(
        cart: Arc<dyn CartStore>,
        navigator: Arc<dyn Navigator>,
        cart_route: impl Into<String>,
    ) -> Self {
        Self {
            cart,
            navigator,
            cart_route: cart_route.into(),
            guard_in_flight: false,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Skip clicks while a request is pending.
    pub fn with_in_flight_guard(mut self, guard: bool) -> Self {
        self.guard_in_flight = guard;
        self
    }

    /// Number of requests currently pending.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Option<InFlightTicket<'_>> {
        if self.guard_in_flight {
            self.in_flight
                .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
                .ok()?;
        } else {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
        }
        Some(InFlightTicket {
            counter: &self.in_flight,
        })
    }

    /// Submit an already-captured request.
    ///
    /// Errors are logged and turned into [`ADD_TO_CART_FAILED_MESSAGE`]; they
    /// never propagate. There is no automatic retry.
    pub async fn submit(&self, item: CartItem) -> AddToCartOutcome {
        let Some(_ticket) = self.begin() else {
            tracing::debug!(
                product_id = %item.product_id,
                "add to cart already in flight, skipping"
            );
            return AddToCartOutcome::Skipped(SkipReason::InFlight);
        };

        match self.cart.add_item(item.clone()).await {
            Ok(()) => {
                tracing::info!(
                    product_id = %item.product_id,
                    quantity = %item.quantity,
                    "item added to cart"
                );
                self.navigator.push(&self.cart_route);
                AddToCartOutcome::Added(item)
            }
            Err(e) => {
                tracing::error!(
                    product_id = %item.product_id,
                    quantity = %item.quantity,
                    error = %e,
                    "Failed to add item to the cart"
                );
                AddToCartOutcome::Failed {
                    item,
                    message: ADD_TO_CART_FAILED_MESSAGE,
                }
            }
        }
    }
}

impl std::fmt::Debug for CartAddOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartAddOrchestrator")
            .field("cart_route", &self.cart_route)
            .field("guard_in_flight", &self.guard_in_flight)
            .field("in_flight", &self.in_flight())
            .finish_non_exhaustive()
    }
}

struct InFlightTicket<'a> {
    counter: &'a AtomicUsize,
}

impl Drop for InFlightTicket<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}
