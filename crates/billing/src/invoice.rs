//! Draft invoice display view. The booking backend owns invoice
//! numbering, issuing, and payment state; this module only renders the
//! figures an operator sees before an invoice is issued.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use venue_core::config::BillingConfig;

use crate::gst::{round_cents, GstBreakdown};

/// One line on a draft invoice as exported by the booking backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: u64,
    pub unit_price: f64,
}

/// An unissued invoice awaiting review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftInvoice {
    pub id: Uuid,
    pub customer_id: String,
    #[serde(default)]
    pub lines: Vec<InvoiceLine>,
}

/// A line with its cent-rounded extended amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLineView {
    pub description: String,
    pub quantity: u64,
    pub unit_price: f64,
    pub amount: f64,
}

/// The rendered totals block for a draft invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceView {
    pub invoice_id: Uuid,
    pub customer_id: String,
    pub lines: Vec<InvoiceLineView>,
    pub subtotal: f64,
    pub gst: f64,
    pub total: f64,
    pub currency: String,
}

impl InvoiceView {
    /// Render a draft for display. Each line amount is rounded to cents
    /// first and the subtotal sums the rounded amounts, so the printed
    /// column always adds up to the printed subtotal.
    pub fn build(draft: &DraftInvoice, config: &BillingConfig) -> Self {
        let lines: Vec<InvoiceLineView> = draft
            .lines
            .iter()
            .map(|line| InvoiceLineView {
                description: line.description.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                amount: round_cents(line.quantity as f64 * line.unit_price.max(0.0)),
            })
            .collect();

        let line_total: f64 = lines.iter().map(|line| line.amount).sum();
        let breakdown = GstBreakdown::from_exclusive(line_total, config.gst_rate);

        debug!(
            invoice_id = %draft.id,
            customer_id = %draft.customer_id,
            total = breakdown.total,
            "Built invoice view"
        );

        Self {
            invoice_id: draft.id,
            customer_id: draft.customer_id.clone(),
            lines,
            subtotal: breakdown.subtotal,
            gst: breakdown.gst,
            total: breakdown.total,
            currency: config.currency.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn line(description: &str, quantity: u64, unit_price: f64) -> InvoiceLine {
        InvoiceLine {
            description: description.to_string(),
            quantity,
            unit_price,
        }
    }

    fn draft(lines: Vec<InvoiceLine>) -> DraftInvoice {
        DraftInvoice {
            id: Uuid::new_v4(),
            customer_id: "cust-1".to_string(),
            lines,
        }
    }

    fn config() -> BillingConfig {
        BillingConfig {
            gst_rate: 0.10,
            currency: "AUD".to_string(),
        }
    }

    #[test]
    fn test_build_totals() {
        let view = InvoiceView::build(
            &draft(vec![
                line("Main hall hire", 2, 450.0),
                line("Cleaning", 1, 175.0),
            ]),
            &config(),
        );

        assert_eq!(view.lines.len(), 2);
        assert!(close(view.lines[0].amount, 900.0));
        assert!(close(view.subtotal, 1075.0));
        assert!(close(view.gst, 107.50));
        assert!(close(view.total, 1182.50));
        assert_eq!(view.currency, "AUD");
    }

    #[test]
    fn test_displayed_column_adds_up() {
        // Amounts that each need rounding: the subtotal must equal the
        // sum of the rounded amounts, not the unrounded products.
        let view = InvoiceView::build(
            &draft(vec![
                line("Chair hire", 3, 66.60),
                line("Corkage", 1, 0.994),
            ]),
            &config(),
        );

        assert!(close(view.lines[0].amount, 199.80));
        assert!(close(view.lines[1].amount, 0.99));
        let summed: f64 = view.lines.iter().map(|l| l.amount).sum();
        assert!(close(view.subtotal, round_cents(summed)));
        assert!(close(view.subtotal, 200.79));
        assert!(close(view.gst, 20.08));
        assert!(close(view.total, 220.87));
    }

    #[test]
    fn test_empty_draft() {
        let view = InvoiceView::build(&draft(vec![]), &config());
        assert!(view.lines.is_empty());
        assert!(close(view.subtotal, 0.0));
        assert!(close(view.total, 0.0));
    }

    #[test]
    fn test_negative_unit_price_clamped() {
        let view = InvoiceView::build(&draft(vec![line("Adjustment", 1, -120.0)]), &config());
        assert!(close(view.lines[0].amount, 0.0));
        assert!(close(view.total, 0.0));
    }

    #[test]
    fn test_draft_deserializes_without_lines() {
        let raw = format!(
            r#"{{"id":"{}","customer_id":"cust-9"}}"#,
            Uuid::new_v4()
        );
        let parsed: DraftInvoice = serde_json::from_str(&raw).unwrap();
        assert!(parsed.lines.is_empty());
    }
}
