//! In-memory hold board. Holds arrive from the booking backend (or the
//! demo generator) and live here only for the lifetime of a console
//! session; the backend remains the system of record.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use venue_core::config::HoldsConfig;

use crate::countdown::HoldCountdown;

/// A tentative reservation awaiting confirmation or payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingHold {
    pub id: Uuid,
    pub customer_id: String,
    pub space: String,
    pub slot_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Concurrent registry of the holds currently on screen.
pub struct HoldBoard {
    holds: DashMap<Uuid, BookingHold>,
    config: HoldsConfig,
}

impl HoldBoard {
    pub fn new(config: &HoldsConfig) -> Self {
        info!(
            default_ttl_minutes = config.default_ttl_minutes,
            expiring_soon_minutes = config.expiring_soon_minutes,
            "Hold board initialized"
        );
        Self {
            holds: DashMap::new(),
            config: config.clone(),
        }
    }

    /// Register a hold that already carries its expiry instant.
    pub fn place(&self, hold: BookingHold) {
        debug!(hold_id = %hold.id, space = %hold.space, "Placed hold");
        metrics::counter!("holds.placed").increment(1);
        self.holds.insert(hold.id, hold);
    }

    /// Create and register a hold expiring after the configured TTL.
    pub fn place_with_ttl(
        &self,
        customer_id: &str,
        space: &str,
        slot_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> BookingHold {
        let hold = BookingHold {
            id: Uuid::new_v4(),
            customer_id: customer_id.to_string(),
            space: space.to_string(),
            slot_date,
            created_at: now,
            expires_at: now + Duration::minutes(self.config.default_ttl_minutes),
        };
        self.place(hold.clone());
        hold
    }

    pub fn release(&self, id: Uuid) -> Option<BookingHold> {
        let released = self.holds.remove(&id).map(|(_, hold)| hold);
        if released.is_some() {
            metrics::counter!("holds.released").increment(1);
        }
        released
    }

    pub fn get(&self, id: Uuid) -> Option<BookingHold> {
        self.holds.get(&id).map(|entry| entry.clone())
    }

    pub fn countdown(&self, id: Uuid, now: DateTime<Utc>) -> Option<HoldCountdown> {
        self.holds
            .get(&id)
            .map(|entry| HoldCountdown::at(entry.expires_at, now))
    }

    /// Holds that have not yet expired, soonest expiry first.
    pub fn active(&self, now: DateTime<Utc>) -> Vec<BookingHold> {
        let mut active: Vec<BookingHold> = self
            .holds
            .iter()
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value().clone())
            .collect();
        active.sort_by_key(|hold| hold.expires_at);
        active
    }

    /// Active holds expiring within the given number of minutes,
    /// soonest first. This backs the "expiring soon" strip.
    pub fn expiring_within(&self, now: DateTime<Utc>, minutes: i64) -> Vec<BookingHold> {
        let horizon = now + Duration::minutes(minutes);
        let mut soon: Vec<BookingHold> = self
            .holds
            .iter()
            .filter(|entry| entry.expires_at > now && entry.expires_at <= horizon)
            .map(|entry| entry.value().clone())
            .collect();
        soon.sort_by_key(|hold| hold.expires_at);
        soon
    }

    /// Drop every expired hold and report how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.holds.len();
        self.holds.retain(|_, hold| hold.expires_at > now);
        let purged = before - self.holds.len();
        if purged > 0 {
            info!(purged, "Purged expired holds");
            metrics::counter!("holds.expired_purged").increment(purged as u64);
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.holds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holds.is_empty()
    }
}
