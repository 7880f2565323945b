//! Money type for representing monetary values.
//!
//! Prices come from the catalog as a currency code, whole `units` and
//! fractional `nanos` (10^-9 of a unit). Keeping both as integers avoids
//! floating-point drift until the value is formatted for display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of nano units in one whole unit.
pub const NANOS_PER_UNIT: i32 = 1_000_000_000;

/// Currency used when nothing else is known.
pub const FALLBACK_CURRENCY: &str = "USD";

/// Get the display symbol for an ISO currency code.
///
/// Unknown codes fall back to the code itself followed by a space.
pub fn currency_symbol(code: &str) -> String {
    let symbol = match code.to_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "\u{20ac}",
        "GBP" => "\u{00a3}",
        "JPY" => "\u{00a5}",
        "CAD" => "CA$",
        "AUD" => "A$",
        "CHF" => "CHF ",
        "CNY" => "\u{00a5}",
        "INR" => "\u{20b9}",
        "MXN" => "MX$",
        _ => return format!("{} ", code),
    };
    symbol.to_string()
}

/// A monetary value with currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// ISO 4217 currency code.
    pub currency_code: String,
    /// Whole units of the amount.
    #[serde(default)]
    pub units: i64,
    /// Nano units; same sign as `units`, magnitude below one unit.
    #[serde(default)]
    pub nanos: i32,
}

impl Money {
    /// Create a new Money value.
    pub fn new(currency_code: impl Into<String>, units: i64, nanos: i32) -> Self {
        Self {
            currency_code: currency_code.into(),
            units,
            nanos,
        }
    }

    /// Create a Money value from a decimal amount, rounded to the nearest nano.
    ///
    /// ```
    /// use turbo_commerce::money::Money;
    /// let price = Money::from_decimal("USD", 49.99);
    /// assert_eq!(price.units, 49);
    /// assert_eq!(price.display(), "$49.99");
    /// ```
    pub fn from_decimal(currency_code: impl Into<String>, amount: f64) -> Self {
        let total_nanos = (amount * NANOS_PER_UNIT as f64).round() as i128;
        let units = (total_nanos / NANOS_PER_UNIT as i128) as i64;
        let nanos = (total_nanos % NANOS_PER_UNIT as i128) as i32;
        Self::new(currency_code, units, nanos)
    }

    /// Convert into another currency at the given rate.
    pub fn converted(&self, currency_code: impl Into<String>, rate: f64) -> Self {
        Self::from_decimal(currency_code, self.to_decimal() * rate)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency_code: impl Into<String>) -> Self {
        Self::new(currency_code, 0, 0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.units == 0 && self.nanos == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.units as f64 + self.nanos as f64 / NANOS_PER_UNIT as f64
    }

    /// Amount in hundredths of a unit, rounded half away from zero.
    ///
    /// Computed in `i128` so any `units` value fits.
    pub fn to_cents(&self) -> i128 {
        let nanos = i128::from(self.nanos);
        let cents_from_nanos = (nanos + nanos.signum() * 5_000_000) / 10_000_000;
        i128::from(self.units) * 100 + cents_from_nanos
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        let cents = self.to_cents();
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.abs();
        format!(
            "{}{}{}.{:02}",
            sign,
            currency_symbol(&self.currency_code),
            cents / 100,
            cents % 100
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero(FALLBACK_CURRENCY)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
