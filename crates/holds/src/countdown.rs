//! Hold-expiry countdown formatting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point-in-time view of how long a hold has left. `remaining_secs`
/// is never negative; once the expiry instant passes the countdown
/// pins at zero and `display` reads `"expired"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldCountdown {
    pub remaining_secs: i64,
    pub expired: bool,
    pub display: String,
}

impl HoldCountdown {
    /// Evaluate the countdown at `now`. The display collapses to the
    /// largest useful segments: `"2d 03h 15m"`, `"1h 05m 30s"`,
    /// `"12m 05s"`, `"45s"`, or `"expired"`.
    pub fn at(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining_secs = (expires_at - now).num_seconds().max(0);
        let expired = remaining_secs == 0;
        Self {
            remaining_secs,
            expired,
            display: format_remaining(remaining_secs),
        }
    }
}

fn format_remaining(secs: i64) -> String {
    if secs <= 0 {
        return "expired".to_string();
    }
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;

    if days > 0 {
        format!("{}d {:02}h {:02}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
