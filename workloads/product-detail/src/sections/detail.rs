//! Product detail section renderer.

use super::escape_html;
use crate::view::ProductDetailSnapshot;

/// Render the product detail section, with the alert overlay when one is pending.
pub fn render_product_detail(snapshot: &ProductDetailSnapshot) -> String {
    let selected = snapshot.quantity.get();
    let options: String = snapshot
        .quantity_options
        .iter()
        .map(|&option| {
            let marker = if option == selected { " selected" } else { "" };
            format!(r#"<option value="{option}"{marker}>{option}</option>"#)
        })
        .collect();

    let loading_class = if snapshot.is_loading {
        " product-detail--loading"
    } else {
        ""
    };

    let alert = snapshot
        .alert
        .as_ref()
        .map(|a| a.render())
        .unwrap_or_default();

    format!(
        r#"<section class="product-detail{loading_class}" data-section="product-detail">
    <div class="product-detail-container">
        <div class="product-image" style="background-image: url('{image}')"></div>
        <div class="product-details">
            <h1 class="product-name">{name}</h1>
            <p class="product-description">{description}</p>
            <p class="product-price">{price}</p>
            <p class="product-quantity-label">Quantity</p>
            <select class="product-quantity" name="quantity">{options}</select>
            <button class="btn-add-to-cart" data-action="add-to-cart">Add To Cart</button>
        </div>
    </div>
</section>{alert}"#,
        loading_class = loading_class,
        image = escape_html(&snapshot.image_url),
        name = escape_html(&snapshot.fields.name),
        description = escape_html(&snapshot.fields.description),
        price = escape_html(&snapshot.price),
        options = options,
        alert = alert,
    )
}
