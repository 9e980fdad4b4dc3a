//! Directory header counters aggregated from a scored batch.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use venue_core::types::ScoredCustomer;

/// Customers with activity inside this many days count as "active" on
/// the directory header.
const ACTIVE_WINDOW_DAYS: i64 = 90;

/// Headline counters shown above the customer table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOverview {
    pub total_customers: u64,
    pub no_history: u64,
    pub active_90d: u64,
    pub total_bookings: u64,
    pub total_lifetime_spend: f64,
    pub avg_clv: f64,
    pub customers_by_tag: HashMap<String, u64>,
    pub generated_at: DateTime<Utc>,
}

/// Aggregate a scored batch into the directory header counters.
pub fn batch_overview(scored: &[ScoredCustomer]) -> BatchOverview {
    let mut no_history = 0u64;
    let mut active_90d = 0u64;
    let mut total_bookings = 0u64;
    let mut total_lifetime_spend = 0.0_f64;
    let mut clv_sum = 0.0_f64;
    let mut customers_by_tag: HashMap<String, u64> = HashMap::new();

    for record in scored {
        if record.total_bookings == 0 {
            no_history += 1;
        }
        if record.total_bookings > 0 && record.last_active_days <= ACTIVE_WINDOW_DAYS {
            active_90d += 1;
        }
        total_bookings += record.total_bookings;
        total_lifetime_spend += record.lifetime_spend;
        clv_sum += record.clv;
        for tag in &record.customer.tags {
            *customers_by_tag.entry(tag.clone()).or_default() += 1;
        }
    }

    let total_customers = scored.len() as u64;
    let avg_clv = if total_customers == 0 {
        0.0
    } else {
        clv_sum / total_customers as f64
    };

    BatchOverview {
        total_customers,
        no_history,
        active_90d,
        total_bookings,
        total_lifetime_spend,
        avg_clv,
        customers_by_tag,
        generated_at: Utc::now(),
    }
}
