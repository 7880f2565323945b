//! Alert overlay renderer.

use super::escape_html;

/// Render the modal overlay with an acknowledgement button.
pub fn render_alert(message: &str) -> String {
    format!(
        r#"<div class="alert-overlay" data-action="dismiss">
    <div class="alert-box">
        <p class="alert-message">{message}</p>
        <button class="alert-ok" data-action="dismiss">OK</button>
    </div>
</div>"#,
        message = escape_html(message)
    )
}
