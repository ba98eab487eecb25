// ABOUTME: Price extraction and normalization from heterogeneous price markup shapes.
// ABOUTME: Handles pre-formatted price strings, split whole/fraction pairs, and discount arithmetic.

//! Price normalization.
//!
//! Two markup shapes exist for a price:
//! - (a) a single pre-formatted string, e.g. `<span class="a-offscreen">₹1,499.00</span>`
//! - (b) a split whole/fraction pair reassembled as `<symbol><whole>.<fraction>`,
//!   with the fraction defaulting to `"00"` when absent.
//!
//! The display string is always retained as seen on the page. The numeric
//! value is derived by stripping every non-digit, non-decimal character;
//! on parse failure the value is `0.0` and no error is surfaced.

use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::selectors::{resolve_first_text, SelectorSpec};

/// Sentinel shown wherever a field has no usable value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Currency symbol used when the split shape carries no symbol element.
const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Selector configuration for one price slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSelectors {
    /// Chains for shape (a): a single pre-formatted price string.
    #[serde(default)]
    pub display: Vec<SelectorSpec>,
    /// Shape (b) whole-part selectors, e.g. ".a-price-whole".
    #[serde(default)]
    pub whole: Vec<SelectorSpec>,
    /// Shape (b) fraction selectors; absent fraction defaults to "00".
    #[serde(default)]
    pub fraction: Vec<SelectorSpec>,
    /// Shape (b) currency symbol selectors; absent symbol defaults to "₹".
    #[serde(default)]
    pub symbol: Vec<SelectorSpec>,
}

/// One resolved price slot: the page's display string plus a derived number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub display: String,
    pub value: f64,
}

impl Price {
    /// The sentinel price: `"N/A"` display, `0.0` value.
    pub fn absent() -> Self {
        Self {
            display: NOT_AVAILABLE.to_string(),
            value: 0.0,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.display == NOT_AVAILABLE
    }
}

/// Extracts one price slot from the document.
///
/// Shape (a) is preferred; shape (b) is attempted only when no display
/// chain matched and requires at least a whole part. Returns
/// [`Price::absent`] when neither shape is present.
pub fn extract_price(doc: &Html, selectors: &PriceSelectors) -> Price {
    if let Some(display) = resolve_first_text(doc, &selectors.display) {
        let value = numeric_value(&display);
        return Price { display, value };
    }

    if let Some(whole) = resolve_first_text(doc, &selectors.whole) {
        // The whole-part span often carries a trailing decimal point.
        let whole = whole.trim_end_matches('.').trim().to_string();
        let fraction = resolve_first_text(doc, &selectors.fraction)
            .unwrap_or_else(|| "00".to_string());
        let symbol = resolve_first_text(doc, &selectors.symbol)
            .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string());
        let display = format!("{}{}.{}", symbol, whole, fraction);
        let value = numeric_value(&display);
        return Price { display, value };
    }

    Price::absent()
}

/// Derives a numeric value from a price display string.
///
/// Strips every character that is not an ASCII digit or `.`, then parses
/// as f64. Unparsable input yields `0.0`, never an error.
pub fn numeric_value(display: &str) -> f64 {
    let cleaned: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            // `display` as a bare name collides with `tracing::field::display`
            // inside the tracing 0.1.44 macro expansion; rebind to avoid it.
            let display_str = display;
            tracing::debug!(display = display_str, "price string did not yield a number");
            0.0
        }
    }
}

/// Computes the discount percentage between two numeric prices.
///
/// Requires both values positive and `original > current`; any other
/// condition (missing, equal, inverted) yields `None`, which the record
/// stores as `"N/A"`. Rendered with exactly one fractional digit.
pub fn discount_percentage(current: f64, original: f64) -> Option<String> {
    if current > 0.0 && original > 0.0 && original > current {
        let pct = (original - current) / original * 100.0;
        Some(format!("{:.1}%", pct))
    } else {
        None
    }
}
