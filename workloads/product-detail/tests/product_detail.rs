//! End-to-end behavior of the product detail page against in-memory
//! collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use product_detail::memory::{InMemoryCart, InMemoryCatalog, RecordingNavigator};
use product_detail::telemetry;
use product_detail::{
    AddToCartOutcome, CartStore, CurrencyStore, DismissTrigger, GatewayError, PdpConfig,
    ProductDetail, ProductGateway, SkipReason, StorefrontContext, ADD_TO_CART_FAILED_MESSAGE,
};
use turbo_commerce::cart::{Cart, CartItem, CartLine, Quantity};
use turbo_commerce::catalog::Product;
use turbo_commerce::{Money, ProductId};
use turbo_query::{FetchOutcome, QueryClient};

const TELESCOPE: &str = "OLJCESPC7Z";
const BINOCULARS: &str = "66VCHSJNUP";

fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::new()
        .with_product(
            Product::new(TELESCOPE, "Explorascope", Money::new("USD", 101, 960_000_000))
                .with_description("Entry-level telescope")
                .with_picture("Explorascope.jpg")
                .with_category("telescopes")
                .with_category("travel")
                .with_category("telescopes"),
        )
        .with_product(
            Product::new(BINOCULARS, "Binoculars", Money::new("USD", 40, 0))
                .with_category("binoculars"),
        )
        .with_rate("EUR", 0.5)
}

struct Page {
    view: ProductDetail,
    cart: Arc<InMemoryCart>,
    nav: Arc<RecordingNavigator>,
    currency: CurrencyStore,
}

fn page_with(
    catalog: Arc<dyn ProductGateway>,
    cart_store: Arc<dyn CartStore>,
    cart: Arc<InMemoryCart>,
    config: PdpConfig,
) -> Page {
    telemetry::init_from_config(&config);
    let nav = Arc::new(RecordingNavigator::new());
    let ctx = StorefrontContext::from_config(&config, catalog, cart_store, nav.clone());
    let currency = ctx.currency.clone();
    Page {
        view: ProductDetail::new(ctx, config, QueryClient::new()),
        cart,
        nav,
        currency,
    }
}

fn page() -> (Page, Arc<InMemoryCatalog>) {
    let catalog = Arc::new(catalog());
    let cart = Arc::new(InMemoryCart::new());
    let page = page_with(catalog.clone(), cart.clone(), cart, PdpConfig::default());
    (page, catalog)
}

fn item(id: &str, q: u32) -> CartItem {
    CartItem::new(ProductId::new(id), Quantity::new(q).unwrap())
}

/// Waits for one permit from `gate`; permits added early are not lost.
async fn pass(gate: &Semaphore) -> Result<(), GatewayError> {
    gate.acquire()
        .await
        .map_err(|_| GatewayError::Unavailable("gate closed".to_string()))?
        .forget();
    Ok(())
}

/// Cart whose `add_item` waits for a permit before delegating.
struct GatedCart {
    inner: Arc<InMemoryCart>,
    release: Arc<Semaphore>,
}

#[async_trait]
impl CartStore for GatedCart {
    fn cart(&self) -> Cart {
        self.inner.cart()
    }

    async fn add_item(&self, item: CartItem) -> Result<(), GatewayError> {
        pass(&self.release).await?;
        self.inner.add_item(item).await
    }
}

/// Catalog whose lookups wait for a permit before delegating.
struct GatedCatalog {
    inner: InMemoryCatalog,
    release: Arc<Semaphore>,
}

#[async_trait]
impl ProductGateway for GatedCatalog {
    async fn get_product(
        &self,
        product_id: &ProductId,
        currency_code: &str,
    ) -> Result<Product, GatewayError> {
        pass(&self.release).await?;
        self.inner.get_product(product_id, currency_code).await
    }
}

fn gated_cart_page(config: PdpConfig) -> (Page, Arc<Semaphore>) {
    let release = Arc::new(Semaphore::new(0));
    let cart = Arc::new(InMemoryCart::new());
    let gated = Arc::new(GatedCart {
        inner: cart.clone(),
        release: release.clone(),
    });
    (page_with(Arc::new(catalog()), gated, cart, config), release)
}

#[tokio::test]
async fn test_add_to_cart_success_scenario() {
    let (page, catalog) = page();
    page.view.on_route_change(Some(TELESCOPE));

    assert_eq!(
        page.view.product_query().key().to_string(),
        r#"["product","OLJCESPC7Z","selectedCurrency","USD"]"#
    );
    let fetched = page.view.load_product().await;
    assert_eq!(fetched.outcome, FetchOutcome::Fetched);
    assert_eq!(catalog.requests(), vec![(ProductId::new(TELESCOPE), "USD".to_string())]);
    assert_eq!(page.view.fields().name, "Explorascope");

    page.view.select_quantity(3).unwrap();
    let outcome = page.view.add_to_cart().await;

    assert_eq!(outcome, AddToCartOutcome::Added(item(TELESCOPE, 3)));
    assert_eq!(page.nav.visits(), vec!["/cart".to_string()]);
    assert_eq!(page.cart.requests(), vec![item(TELESCOPE, 3)]);
    assert_eq!(page.view.view_state().error_message, None);
    assert!(page.view.alert().is_none());
}

#[tokio::test]
async fn test_add_to_cart_failure_scenario() {
    let (page, _) = page();
    page.view.on_route_change(Some(TELESCOPE));
    page.view.select_quantity(3).unwrap();
    page.cart.set_failing(true);

    let outcome = page.view.add_to_cart().await;

    assert!(matches!(outcome, AddToCartOutcome::Failed { .. }));
    assert_eq!(
        page.view.view_state().error_message.as_deref(),
        Some("Failed to add item to the cart. Please try again.")
    );
    let alert = page.view.alert().expect("alert should be showing");
    assert_eq!(alert.message(), ADD_TO_CART_FAILED_MESSAGE);

    alert.dismiss(DismissTrigger::Acknowledge);

    assert_eq!(page.view.view_state().error_message, None);
    assert!(page.view.alert().is_none());
    assert!(page.nav.visits().is_empty());
    assert_eq!(page.view.view_state().selector.quantity().get(), 3);

    // Dismissing again is harmless.
    alert.dismiss(DismissTrigger::Overlay);
    assert!(page.nav.visits().is_empty());
}

#[tokio::test]
async fn test_retry_after_dismiss_is_user_driven() {
    let (page, _) = page();
    page.view.on_route_change(Some(TELESCOPE));
    page.cart.set_failing(true);

    page.view.add_to_cart().await;
    assert_eq!(page.cart.requests().len(), 1);

    page.view.dismiss_alert();
    page.cart.set_failing(false);
    let outcome = page.view.add_to_cart().await;

    assert_eq!(outcome, AddToCartOutcome::Added(item(TELESCOPE, 1)));
    assert_eq!(page.cart.requests().len(), 2);
    assert_eq!(page.nav.visits(), vec!["/cart".to_string()]);
}

#[tokio::test]
async fn test_route_change_resets_quantity() {
    let (page, _) = page();
    page.view.on_route_change(Some(TELESCOPE));
    page.view.select_quantity(10).unwrap();

    page.view.on_route_change(Some(BINOCULARS));

    assert_eq!(page.view.view_state().selector.quantity(), Quantity::ONE);
    assert_eq!(
        page.view.product_query().product_id(),
        Some(&ProductId::new(BINOCULARS))
    );
}

#[tokio::test]
async fn test_out_of_range_selection_rejected() {
    let (page, _) = page();
    page.view.on_route_change(Some(TELESCOPE));
    page.view.select_quantity(4).unwrap();

    assert!(page.view.select_quantity(11).is_err());
    assert_eq!(page.view.view_state().selector.quantity().get(), 4);
}

#[tokio::test]
async fn test_unresolved_route_disables_fetch_and_add() {
    let (page, catalog) = page();
    page.view.on_route_change(None);

    let fetched = page.view.load_product().await;
    let outcome = page.view.add_to_cart().await;

    assert_eq!(fetched.outcome, FetchOutcome::Disabled);
    assert_eq!(outcome, AddToCartOutcome::Skipped(SkipReason::ProductUnresolved));
    assert!(catalog.requests().is_empty());
    assert!(page.cart.requests().is_empty());
    assert!(page.view.snapshot().is_loading);
}

#[tokio::test]
async fn test_currency_change_forces_refetch() {
    let (page, catalog) = page();
    page.view.on_route_change(Some(TELESCOPE));
    page.view.load_product().await;
    assert_eq!(page.view.fields().price, Money::new("USD", 101, 960_000_000));

    page.currency.select("EUR");
    page.view.on_currency_change();

    // The USD response is not reused under the EUR key.
    assert!(page.view.fields().price.is_zero());
    assert!(page.view.snapshot().is_loading);

    let fetched = page.view.load_product().await;
    assert_eq!(fetched.outcome, FetchOutcome::Fetched);
    assert_eq!(page.view.fields().price.currency_code, "EUR");
    assert_eq!(
        catalog.requests(),
        vec![
            (ProductId::new(TELESCOPE), "USD".to_string()),
            (ProductId::new(TELESCOPE), "EUR".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_switching_back_reuses_cached_key() {
    let (page, _) = page();
    page.view.on_route_change(Some(TELESCOPE));
    page.view.load_product().await;

    page.view.on_route_change(Some(BINOCULARS));
    page.view.load_product().await;
    assert_eq!(page.view.fields().name, "Binoculars");

    page.view.on_route_change(Some(TELESCOPE));
    assert_eq!(page.view.fields().name, "Explorascope");
}

#[tokio::test]
async fn test_stale_response_not_shown_after_route_change() {
    let release = Arc::new(Semaphore::new(0));
    let catalog = Arc::new(GatedCatalog {
        inner: catalog(),
        release: release.clone(),
    });
    let cart = Arc::new(InMemoryCart::new());
    let page = page_with(catalog, cart.clone(), cart, PdpConfig::default());
    page.view.on_route_change(Some(TELESCOPE));

    let slow = page.view.load_product();
    let navigate = async {
        tokio::task::yield_now().await;
        page.view.on_route_change(Some(BINOCULARS));
        release.add_permits(1);
    };
    let (fetched, ()) = futures::future::join(slow, navigate).await;

    assert_eq!(fetched.outcome, FetchOutcome::Fetched);
    assert!(fetched.superseded);
    assert_eq!(page.view.fields().name, "");

    release.add_permits(1);
    page.view.load_product().await;
    assert_eq!(page.view.fields().name, "Binoculars");
}

#[tokio::test]
async fn test_in_flight_add_keeps_captured_inputs() {
    let (page, release) = gated_cart_page(PdpConfig::default());
    page.view.on_route_change(Some(TELESCOPE));
    page.view.select_quantity(3).unwrap();

    let click = page.view.add_to_cart();
    let navigate = async {
        tokio::task::yield_now().await;
        page.view.on_route_change(Some(BINOCULARS));
        page.view.select_quantity(5).unwrap();
        release.add_permits(1);
    };
    let (outcome, ()) = futures::future::join(click, navigate).await;

    assert_eq!(outcome, AddToCartOutcome::Added(item(TELESCOPE, 3)));
    assert_eq!(page.cart.requests(), vec![item(TELESCOPE, 3)]);
    assert_eq!(page.view.view_state().selector.quantity().get(), 5);
}

#[tokio::test]
async fn test_overlapping_clicks_each_issue_a_request() {
    let (page, release) = gated_cart_page(PdpConfig::default());
    page.view.on_route_change(Some(TELESCOPE));

    let first = page.view.add_to_cart();
    let second = async {
        tokio::task::yield_now().await;
        page.view.add_to_cart().await
    };
    let releaser = async {
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        release.add_permits(2);
    };
    let (a, b, ()) = futures::future::join3(first, second, releaser).await;

    assert_eq!(a, AddToCartOutcome::Added(item(TELESCOPE, 1)));
    assert_eq!(b, AddToCartOutcome::Added(item(TELESCOPE, 1)));
    assert_eq!(page.cart.requests().len(), 2);
    assert_eq!(page.nav.visits().len(), 2);
}

#[tokio::test]
async fn test_in_flight_guard_skips_overlapping_click() {
    let config = PdpConfig {
        guard_in_flight_add: true,
        ..PdpConfig::default()
    };
    let (page, release) = gated_cart_page(config);
    page.view.on_route_change(Some(TELESCOPE));

    let first = page.view.add_to_cart();
    let second = async {
        tokio::task::yield_now().await;
        let outcome = page.view.add_to_cart().await;
        release.add_permits(1);
        outcome
    };
    let (a, b) = futures::future::join(first, second).await;

    assert_eq!(a, AddToCartOutcome::Added(item(TELESCOPE, 1)));
    assert_eq!(b, AddToCartOutcome::Skipped(SkipReason::InFlight));
    assert_eq!(page.cart.requests().len(), 1);
}

#[tokio::test]
async fn test_product_fetch_failure_has_no_alert() {
    let (page, _) = page();
    page.view.on_route_change(Some("UNKNOWN"));

    let fetched = page.view.load_product().await;

    assert!(matches!(fetched.outcome, FetchOutcome::Failed(_)));
    assert_eq!(page.view.fields().name, "");
    assert!(page.view.alert().is_none());
}

#[tokio::test]
async fn test_ad_context_is_deduplicated() {
    let catalog = Arc::new(catalog());
    let cart = Arc::new(InMemoryCart::with_cart(Cart {
        items: vec![
            CartLine::new(BINOCULARS, 1),
            CartLine::new(TELESCOPE, 2),
            CartLine::new(BINOCULARS, 1),
        ],
    }));
    let page = page_with(catalog, cart.clone(), cart, PdpConfig::default());
    page.view.on_route_change(Some(TELESCOPE));
    page.view.load_product().await;

    let ad = page.view.ad_context();

    assert_eq!(
        ad.product_ids,
        vec![ProductId::new(TELESCOPE), ProductId::new(BINOCULARS)]
    );
    assert_eq!(ad.context_keys, vec!["telescopes".to_string(), "travel".to_string()]);
}

#[tokio::test]
async fn test_snapshot_render() {
    let (page, _) = page();
    page.view.on_route_change(Some(TELESCOPE));
    page.view.load_product().await;
    page.view.select_quantity(2).unwrap();

    let snapshot = page.view.snapshot();
    assert_eq!(snapshot.image_url, "/images/products/Explorascope.jpg");
    assert_eq!(snapshot.price, "$101.96");
    assert_eq!(snapshot.quantity_options, (1..=10).collect::<Vec<u32>>());
    assert!(!snapshot.is_loading);

    let html = snapshot.render();
    assert!(html.contains("Explorascope"));
    assert!(html.contains(r#"<option value="2" selected>2</option>"#));
    assert!(!html.contains("alert-overlay"));

    page.cart.set_failing(true);
    page.view.add_to_cart().await;
    let html = page.view.render();
    assert!(html.contains("alert-overlay"));
    assert!(html.contains(ADD_TO_CART_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_currency_store_switch_without_event_hides_old_price() {
    let (page, catalog) = page();
    page.view.on_route_change(Some(TELESCOPE));
    page.view.load_product().await;
    assert_eq!(page.view.snapshot().price, "$101.96");

    // The switcher writes the shared store; the page gets no event.
    page.currency.select("EUR");

    assert_eq!(
        page.view.product_query().key().to_string(),
        r#"["product","OLJCESPC7Z","selectedCurrency","EUR"]"#
    );
    let fields = page.view.fields();
    assert!(fields.price.is_zero());
    assert!(fields.name.is_empty());
    assert!(page.view.ad_context().context_keys.is_empty());
    let snapshot = page.view.snapshot();
    assert_eq!(snapshot.price, "$0.00");
    assert!(snapshot.is_loading);

    page.view.load_product().await;
    assert_eq!(page.view.snapshot().price, "\u{20ac}50.98");
    assert_eq!(catalog.requests().len(), 2);
}
