//! GST display math: cent rounding and the exclusive/inclusive breakdown.

use serde::{Deserialize, Serialize};

/// Round an amount to whole cents, half away from zero. Every figure
/// shown on an invoice goes through this before display.
pub fn round_cents(amount: f64) -> f64 {
    if !amount.is_finite() {
        return 0.0;
    }
    (amount * 100.0).round() / 100.0
}

/// An amount split into subtotal, GST, and total. All three fields are
/// cent-rounded so they can be printed as-is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GstBreakdown {
    pub subtotal: f64,
    pub gst: f64,
    pub total: f64,
    pub rate: f64,
}

impl GstBreakdown {
    /// Breakdown of a GST-exclusive subtotal: GST is added on top.
    pub fn from_exclusive(subtotal: f64, rate: f64) -> Self {
        let rate = rate.max(0.0);
        let subtotal = round_cents(subtotal.max(0.0));
        let gst = round_cents(subtotal * rate);
        Self {
            subtotal,
            gst,
            total: round_cents(subtotal + gst),
            rate,
        }
    }

    /// Breakdown of a GST-inclusive total: the GST component is
    /// `total * rate / (1 + rate)` and the subtotal is the remainder.
    pub fn from_inclusive(total: f64, rate: f64) -> Self {
        let rate = rate.max(0.0);
        let total = round_cents(total.max(0.0));
        let gst = round_cents(total * rate / (1.0 + rate));
        Self {
            subtotal: round_cents(total - gst),
            gst,
            total,
            rate,
        }
    }
}
