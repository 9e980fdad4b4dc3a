//! Customer lifetime analytics — batch-relative RFM quintile scoring and
//! the CLV projection behind the customer directory.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use venue_core::config::AnalyticsConfig;
use venue_core::types::{CustomerRecord, RfmCode, ScoredCustomer};

/// Quintile breakpoints over the normalized ratios; inclusive upper
/// bounds, ratios above the last breakpoint land in bucket 5. Fixed by
/// design, not configuration.
const QUINTILE_BREAKPOINTS: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Stateless scoring engine over customer booking history.
pub struct CustomerScorer {
    config: AnalyticsConfig,
}

/// Per-customer raw features, prior to batch normalization.
struct RawFeatures {
    recency_days: i64,
    frequency_12m: u64,
    monetary_12m: f64,
    total_bookings: u64,
    lifetime_spend: f64,
}

impl CustomerScorer {
    pub fn new(config: &AnalyticsConfig) -> Self {
        info!(
            window_days = config.window_days,
            tenure_multiplier = config.tenure_multiplier,
            "Customer scorer initialized"
        );
        Self {
            config: config.clone(),
        }
    }

    /// Score a batch against `Utc::now()`, captured once for the run.
    pub fn score_batch_now(&self, customers: &[CustomerRecord]) -> Vec<ScoredCustomer> {
        self.score_batch(customers, Utc::now())
    }

    /// Map a customer batch to scored records.
    ///
    /// Quintile boundaries are batch-relative: each axis is normalized by
    /// the maximum observed across the whole input, so re-running with a
    /// different batch can move every customer's digits even when that
    /// customer's own history is unchanged. Exactly one output per input,
    /// output order matches input order, and `as_of` is the single time
    /// capture for the whole run.
    pub fn score_batch(
        &self,
        customers: &[CustomerRecord],
        as_of: DateTime<Utc>,
    ) -> Vec<ScoredCustomer> {
        if customers.is_empty() {
            return Vec::new();
        }

        let today = as_of.date_naive();
        let window_start = today - chrono::Duration::days(self.config.window_days);

        let raw: Vec<RawFeatures> = customers
            .iter()
            .map(|c| self.raw_features(c, today, window_start))
            .collect();

        // Batch maxima, floored so denominators are never zero. A customer
        // with no history already contributed `window_days` as its recency
        // substitute in `raw_features`.
        let max_recency_gap = raw
            .iter()
            .map(|r| r.recency_days)
            .max()
            .unwrap_or(self.config.window_days)
            .max(1) as f64;
        let max_frequency = raw.iter().map(|r| r.frequency_12m).max().unwrap_or(0).max(1) as f64;
        let max_monetary = raw
            .iter()
            .map(|r| r.monetary_12m)
            .fold(0.0_f64, f64::max)
            .max(1.0);

        let scored: Vec<ScoredCustomer> = customers
            .iter()
            .zip(raw)
            .map(|(customer, r)| {
                // Recency is inverted: a smaller gap means a higher digit.
                let recency_bucket = 6 - quintile(r.recency_days as f64 / max_recency_gap);
                let frequency_bucket = quintile(r.frequency_12m as f64 / max_frequency);
                let monetary_bucket = quintile(r.monetary_12m / max_monetary);
                let rfm = RfmCode::new(recency_bucket, frequency_bucket, monetary_bucket);

                let avg_spend = if r.total_bookings == 0 {
                    0.0
                } else {
                    r.lifetime_spend / r.total_bookings as f64
                };
                let clv = avg_spend * r.frequency_12m as f64 * self.config.tenure_multiplier;

                debug!(customer_id = %customer.id, rfm = %rfm, clv, "Customer scored");

                ScoredCustomer {
                    customer: customer.clone(),
                    rfm,
                    clv,
                    last_active_days: r.recency_days,
                    total_bookings: r.total_bookings,
                    lifetime_spend: r.lifetime_spend,
                }
            })
            .collect();

        metrics::counter!("insights.batches_scored").increment(1);
        metrics::counter!("insights.customers_scored").increment(scored.len() as u64);
        info!(customers = scored.len(), %as_of, "Customer batch scored");

        scored
    }

    /// Windowed and all-time raw features for one customer. Non-cancelled
    /// bookings are sorted descending by date here; caller order is never
    /// trusted.
    fn raw_features(
        &self,
        customer: &CustomerRecord,
        today: NaiveDate,
        window_start: NaiveDate,
    ) -> RawFeatures {
        let mut valid: Vec<(NaiveDate, f64)> = customer
            .non_cancelled()
            .map(|b| (b.date, sanitize_spend(&customer.id, b.spend)))
            .collect();
        valid.sort_by(|a, b| b.0.cmp(&a.0));

        // Future-dated bookings clamp the gap at zero days.
        let recency_days = valid
            .first()
            .map(|(date, _)| (today - *date).num_days().max(0))
            .unwrap_or(self.config.window_days);

        let mut frequency_12m = 0u64;
        let mut monetary_12m = 0.0_f64;
        let mut lifetime_spend = 0.0_f64;
        for (date, spend) in &valid {
            lifetime_spend += spend;
            if *date > window_start {
                frequency_12m += 1;
                monetary_12m += spend;
            }
        }

        RawFeatures {
            recency_days,
            frequency_12m,
            monetary_12m,
            total_bookings: valid.len() as u64,
            lifetime_spend,
        }
    }
}

/// Map a `[0, 1]` ratio to a quintile bucket: <=0.2 -> 1, <=0.4 -> 2,
/// <=0.6 -> 3, <=0.8 -> 4, else 5.
fn quintile(ratio: f64) -> u8 {
    for (i, breakpoint) in QUINTILE_BREAKPOINTS.iter().enumerate() {
        if ratio <= *breakpoint {
            return (i + 1) as u8;
        }
    }
    5
}

/// Negative and non-finite spend must never reach the quintile math.
fn sanitize_spend(customer_id: &str, spend: f64) -> f64 {
    if !spend.is_finite() || spend < 0.0 {
        warn!(customer_id, spend, "Clamping suspect booking spend to 0");
        return 0.0;
    }
    spend
}
