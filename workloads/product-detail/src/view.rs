//! Product detail view-model.
//!
//! Ties the pieces together: the routed product id and selected currency
//! drive the product query, the quantity selector follows the product, and
//! add-to-cart failures surface as an [`Alert`].
//!
//! All state transitions are discrete events (`on_route_change`,
//! `on_currency_change`, `select_quantity`, `add_to_cart`,
//! `dismiss_alert`). The view state lock is never held across an `.await`,
//! so events keep flowing while a fetch or an add-to-cart is pending.

use std::sync::{Arc, Mutex, MutexGuard};

use turbo_commerce::cart::{Cart, CartItem, Quantity};
use turbo_commerce::catalog::Product;
use turbo_commerce::{CommerceError, ProductId};
use turbo_query::{ObservedFetch, QueryClient, QueryObserver, QueryResult};

use crate::alert::Alert;
use crate::cart_add::{AddToCartOutcome, CartAddOrchestrator, SkipReason};
use crate::config::PdpConfig;
use crate::context::StorefrontContext;
use crate::product_query::{ProductFields, ProductQuery};
use crate::quantity::QuantitySelector;

/// Page-local state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Quantity selection, keyed by product.
    pub selector: QuantitySelector,
    /// Pending failure message; `None` when no alert is showing.
    pub error_message: Option<String>,
}

impl ViewState {
    /// Capture an add-to-cart request from the current state.
    pub fn cart_item(&self) -> Option<CartItem> {
        let product_id = self.selector.product_id()?.clone();
        Some(CartItem::new(product_id, self.selector.quantity()))
    }
}

type SharedState = Arc<Mutex<ViewState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, ViewState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Inputs handed to the advertising collaborator.
///
/// Both lists are sets: no repeats, first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdContext {
    /// The current product followed by every other product in the cart.
    pub product_ids: Vec<ProductId>,
    /// Distinct categories of the current product.
    pub context_keys: Vec<String>,
}

impl AdContext {
    /// Build the context from the routed product, its response (if any) and
    /// the cart.
    pub fn new(current: Option<&ProductId>, product: Option<&Product>, cart: &Cart) -> Self {
        let product_ids = current
            .cloned()
            .into_iter()
            .chain(
                cart.distinct_product_ids()
                    .into_iter()
                    .filter(|id| Some(id) != current),
            )
            .collect();

        Self {
            product_ids,
            context_keys: product.map(Product::distinct_categories).unwrap_or_default(),
        }
    }
}

/// Everything needed to draw the page at one instant.
#[derive(Debug, Clone)]
pub struct ProductDetailSnapshot {
    pub product_id: Option<ProductId>,
    pub fields: ProductFields,
    pub is_loading: bool,
    pub quantity: Quantity,
    pub quantity_options: Vec<u32>,
    pub image_url: String,
    pub price: String,
    pub alert: Option<Alert>,
    pub ad_context: AdContext,
}

impl ProductDetailSnapshot {
    /// Render the page section as HTML.
    pub fn render(&self) -> String {
        crate::sections::render_product_detail(self)
    }
}

/// The product detail page.
pub struct ProductDetail {
    ctx: StorefrontContext,
    config: PdpConfig,
    state: SharedState,
    product: QueryObserver<Product>,
    orchestrator: CartAddOrchestrator,
}

impl ProductDetail {
    /// Create a page sharing `products` with the rest of the storefront.
    pub fn new(ctx: StorefrontContext, config: PdpConfig, products: QueryClient<Product>) -> Self {
        let orchestrator = CartAddOrchestrator::new(
            Arc::clone(&ctx.cart),
            Arc::clone(&ctx.navigator),
            config.cart_route.clone(),
        )
        .with_in_flight_guard(config.guard_in_flight_add);

        Self {
            ctx,
            config,
            state: Arc::new(Mutex::new(ViewState::default())),
            product: QueryObserver::new(products),
            orchestrator,
        }
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        lock(&self.state)
    }

    /// A copy of the page-local state.
    pub fn view_state(&self) -> ViewState {
        self.state().clone()
    }

    /// The product query for the current route and currency.
    pub fn product_query(&self) -> ProductQuery {
        let product_id = self.state().selector.product_id().cloned();
        ProductQuery::new(product_id, self.ctx.currency.selected())
    }

    fn sync_query(&self) -> ProductQuery {
        let query = self.product_query();
        if self.product.set_query(query.key()) {
            tracing::debug!(
                key = %query.key(),
                enabled = query.is_enabled(),
                "product query key changed"
            );
        }
        query
    }

    /// The router resolved (or lost) the `productId` parameter.
    ///
    /// The quantity reset and the key change happen before this returns.
    pub fn on_route_change(&self, product_param: Option<&str>) {
        let product_id = ProductId::from_param(product_param);
        let changed = self.state().selector.on_product_change(product_id);
        if changed {
            self.sync_query();
        }
    }

    /// The shared currency selection changed.
    pub fn on_currency_change(&self) {
        self.sync_query();
    }

    /// Fetch the product for the current key.
    ///
    /// A response that arrives after the route or currency moved on stays
    /// cached under its own key and is not shown.
    pub async fn load_product(&self) -> ObservedFetch {
        let query = self.sync_query();
        let key = query.key();
        let options = query.options(self.config.product_stale_time());
        let products = Arc::clone(&self.ctx.products);

        self.product
            .fetch(&key, &options, move || async move { query.fetch(products.as_ref()).await })
            .await
    }

    /// The shopper picked a quantity.
    pub fn select_quantity(&self, value: u32) -> Result<Quantity, CommerceError> {
        self.state().selector.select(value)
    }

    /// The shopper clicked "Add To Cart".
    ///
    /// Product id and quantity are captured before the request is sent.
    pub async fn add_to_cart(&self) -> AddToCartOutcome {
        let Some(item) = self.state().cart_item() else {
            tracing::debug!("add to cart before product resolved, skipping");
            return AddToCartOutcome::Skipped(SkipReason::ProductUnresolved);
        };

        let outcome = self.orchestrator.submit(item).await;
        if let AddToCartOutcome::Failed { message, .. } = &outcome {
            self.state().error_message = Some(message.to_string());
        }
        outcome
    }

    /// Clear the pending failure message.
    pub fn dismiss_alert(&self) {
        self.state().error_message = None;
    }

    /// The alert to show, if a failure is pending.
    pub fn alert(&self) -> Option<Alert> {
        let message = self.state().error_message.clone();
        let state = Arc::clone(&self.state);
        Alert::present(message.as_deref(), move || {
            lock(&state).error_message = None;
        })
    }

    /// The product response for the current route and currency.
    ///
    /// The currency store can change without an event reaching the page, so
    /// the key is re-derived before every read.
    fn current_product(&self) -> QueryResult<Product> {
        self.sync_query();
        self.product.result()
    }

    /// Product fields with fallbacks.
    pub fn fields(&self) -> ProductFields {
        ProductFields::from_response(self.current_product().data.as_ref())
    }

    /// Inputs for the advertising collaborator.
    pub fn ad_context(&self) -> AdContext {
        let product_id = self.state().selector.product_id().cloned();
        let result = self.current_product();
        AdContext::new(product_id.as_ref(), result.data.as_ref(), &self.ctx.cart.cart())
    }

    /// Capture everything needed to draw the page.
    pub fn snapshot(&self) -> ProductDetailSnapshot {
        let state = self.view_state();
        let result = self.current_product();
        let fields = ProductFields::from_response(result.data.as_ref());
        let product_id = state.selector.product_id().cloned();
        let ad_context =
            AdContext::new(product_id.as_ref(), result.data.as_ref(), &self.ctx.cart.cart());

        ProductDetailSnapshot {
            image_url: fields.image_url(&self.config.image_base_path),
            price: fields.price.display(),
            is_loading: result.is_loading(),
            quantity: state.selector.quantity(),
            quantity_options: QuantitySelector::options().to_vec(),
            alert: self.alert(),
            product_id,
            fields,
            ad_context,
        }
    }

    /// Render the page section as HTML.
    pub fn render(&self) -> String {
        self.snapshot().render()
    }
}

impl std::fmt::Debug for ProductDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductDetail")
            .field("state", &self.view_state())
            .field("orchestrator", &self.orchestrator)
            .finish_non_exhaustive()
    }
}
