//! Snapshot loading. The booking backend periodically exports a JSON
//! snapshot; the console reads it from disk on page entry.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use venue_billing::DraftInvoice;
use venue_core::types::CustomerRecord;
use venue_core::{VenueError, VenueResult};
use venue_holds::BookingHold;

/// One page load's worth of backend data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSnapshot {
    pub customers: Vec<CustomerRecord>,
    #[serde(default)]
    pub holds: Vec<BookingHold>,
    #[serde(default)]
    pub draft_invoices: Vec<DraftInvoice>,
}

/// Reads `AdminSnapshot` exports from a file path.
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> VenueResult<AdminSnapshot> {
        let raw = fs::read_to_string(&self.path).await?;
        let snapshot: AdminSnapshot = serde_json::from_str(&raw).map_err(|e| {
            VenueError::Snapshot(format!("{}: {}", self.path.display(), e))
        })?;
        info!(
            path = %self.path.display(),
            customers = snapshot.customers.len(),
            holds = snapshot.holds.len(),
            draft_invoices = snapshot.draft_invoices.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }
}
