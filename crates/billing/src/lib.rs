//! Billing display math for the booking console. Everything here is
//! presentation-side: GST breakdowns and draft invoice views built from
//! backend exports. Issuing, numbering, and payment stay in the backend.

pub mod gst;
pub mod invoice;

pub use gst::{round_cents, GstBreakdown};
pub use invoice::{DraftInvoice, InvoiceLine, InvoiceLineView, InvoiceView};
