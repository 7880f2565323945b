//! Modal alert presenter.
//!
//! Stateless: an [`Alert`] is a message plus a dismissal callback. Whether an
//! alert exists at all is decided by the caller's state.

use std::fmt;
use std::sync::Arc;

/// Callback invoked on dismissal.
pub type DismissCallback = Arc<dyn Fn() + Send + Sync>;

/// How the shopper dismissed the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTrigger {
    /// Click anywhere on the overlay.
    Overlay,
    /// The "OK" button.
    Acknowledge,
}

/// A full-viewport modal showing one message.
#[derive(Clone)]
pub struct Alert {
    message: String,
    on_dismiss: DismissCallback,
}

impl Alert {
    /// Build an alert for `message`, or nothing when there is no message.
    pub fn present<F>(message: Option<&str>, on_dismiss: F) -> Option<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let message = message.filter(|m| !m.is_empty())?;
        Some(Self {
            message: message.to_string(),
            on_dismiss: Arc::new(on_dismiss),
        })
    }

    /// The message shown.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Notify the owner that the shopper dismissed the alert.
    ///
    /// Safe to call more than once.
    pub fn dismiss(&self, trigger: DismissTrigger) {
        tracing::debug!(?trigger, "alert dismissed");
        (self.on_dismiss)();
    }

    /// Render the overlay markup.
    pub fn render(&self) -> String {
        crate::sections::render_alert(&self.message)
    }
}

impl fmt::Debug for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alert")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
