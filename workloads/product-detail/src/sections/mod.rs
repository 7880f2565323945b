//! Section renderers for the product detail page.

mod alert;
mod detail;

pub use alert::*;
pub use detail::*;

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
