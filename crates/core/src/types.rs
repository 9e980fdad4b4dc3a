use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::VenueError;

/// A single historical booking for one customer, as exported by the
/// booking backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Calendar date the booking was held on.
    pub date: NaiveDate,
    /// Amount charged for the booking. Non-negative by contract; scoring
    /// clamps anything else.
    #[serde(default)]
    pub spend: f64,
    /// Cancelled bookings are excluded from all scoring.
    #[serde(default)]
    pub cancelled: bool,
    /// Informational only; not consumed by the scoring formula.
    #[serde(default)]
    pub on_time: bool,
}

/// A customer with their full booking history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Labels such as "VIP" or "NFP"; passed through scoring unchanged.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Any order; consumers must not assume pre-sorting.
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
}

impl CustomerRecord {
    /// Bookings that still count toward scoring.
    pub fn non_cancelled(&self) -> impl Iterator<Item = &BookingRecord> {
        self.bookings.iter().filter(|b| !b.cancelled)
    }

    /// Case-insensitive tag membership test.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Recency/Frequency/Monetary quintile code, one digit 1–5 per axis.
/// Renders and serializes as the 3-character string form, Recency first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RfmCode {
    recency: u8,
    frequency: u8,
    monetary: u8,
}

impl RfmCode {
    /// Build a code, clamping each digit into 1..=5.
    pub fn new(recency: u8, frequency: u8, monetary: u8) -> Self {
        Self {
            recency: recency.clamp(1, 5),
            frequency: frequency.clamp(1, 5),
            monetary: monetary.clamp(1, 5),
        }
    }

    pub fn recency(&self) -> u8 {
        self.recency
    }

    pub fn frequency(&self) -> u8 {
        self.frequency
    }

    pub fn monetary(&self) -> u8 {
        self.monetary
    }
}

impl fmt::Display for RfmCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.recency, self.frequency, self.monetary)
    }
}

impl FromStr for RfmCode {
    type Err = VenueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: Vec<u8> = s
            .chars()
            .filter_map(|c| c.to_digit(10).map(|d| d as u8))
            .collect();
        if digits.len() != 3 || s.chars().count() != 3 {
            return Err(VenueError::InvalidRfm(s.to_string()));
        }
        if digits.iter().any(|d| !(1..=5).contains(d)) {
            return Err(VenueError::InvalidRfm(s.to_string()));
        }
        Ok(Self {
            recency: digits[0],
            frequency: digits[1],
            monetary: digits[2],
        })
    }
}

impl Serialize for RfmCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RfmCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The input customer record extended with batch-relative scores.
/// Derived fresh on every scoring run; never persisted or cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCustomer {
    #[serde(flatten)]
    pub customer: CustomerRecord,
    pub rfm: RfmCode,
    /// Estimated lifetime value: avg spend per booking x 12-month
    /// frequency x the configured tenure multiplier.
    pub clv: f64,
    /// Days since the most recent non-cancelled booking (window length
    /// when there is no history).
    pub last_active_days: i64,
    /// All-time count of non-cancelled bookings.
    pub total_bookings: u64,
    /// All-time spend over non-cancelled bookings.
    pub lifetime_spend: f64,
}
