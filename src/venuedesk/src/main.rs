//! VenueDesk — booking analytics console for venue operators.
//!
//! Entry point that loads (or generates) a backend snapshot, scores the
//! customer batch, and reports the directory, hold board, and draft
//! invoice views an operator would see.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::info;

use venue_billing::InvoiceView;
use venue_core::config::AppConfig;
use venue_directory::{
    AdminSnapshot, DemoGenerator, DirectoryView, SnapshotSource, SortColumn, SortDirection,
};
use venue_holds::{HoldBoard, HoldCountdown};
use venue_insights::{batch_overview, CustomerScorer};

#[derive(Parser, Debug)]
#[command(name = "venuedesk")]
#[command(about = "Booking analytics console for venue operators")]
#[command(version)]
struct Cli {
    /// Backend snapshot JSON to load (demo data is generated if omitted)
    #[arg(long, env = "VENUEDESK__SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Number of demo customers to generate when no snapshot is given
    #[arg(long, env = "VENUEDESK__CUSTOMERS", default_value_t = 24)]
    customers: usize,

    /// Demo generator seed for reproducible runs
    #[arg(long, env = "VENUEDESK__SEED")]
    seed: Option<u64>,

    /// Score as of this instant (RFC 3339) instead of the wall clock
    #[arg(long)]
    as_of: Option<DateTime<Utc>>,

    /// Write the scored batch as pretty JSON to this path
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "venuedesk=info,venue_core=info,venue_insights=info,venue_billing=info,\
                 venue_holds=info,venue_directory=info"
                    .into()
            }),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("VenueDesk starting up");

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    let as_of = cli.as_of.unwrap_or_else(Utc::now);

    let snapshot = match &cli.snapshot {
        Some(path) => SnapshotSource::new(path).load().await?,
        None => {
            info!(
                customers = cli.customers,
                seed = ?cli.seed,
                "No snapshot given, generating demo data"
            );
            DemoGenerator::new(cli.seed).generate_at(cli.customers, as_of)
        }
    };
    let AdminSnapshot {
        customers,
        holds,
        draft_invoices,
    } = snapshot;

    // Score the batch
    let scorer = CustomerScorer::new(&config.analytics);
    let scored = scorer.score_batch(&customers, as_of);

    let overview = batch_overview(&scored);
    info!(
        total_customers = overview.total_customers,
        no_history = overview.no_history,
        active_90d = overview.active_90d,
        total_bookings = overview.total_bookings,
        total_lifetime_spend = overview.total_lifetime_spend,
        avg_clv = overview.avg_clv,
        "Batch scored"
    );

    // Directory: top customers by CLV
    let mut directory = DirectoryView::new(scored.clone(), &config.directory);
    directory.set_sort(SortColumn::Clv, SortDirection::Descending);
    for (rank, row) in directory.rows().into_iter().take(5).enumerate() {
        info!(
            rank = rank + 1,
            customer_id = %row.customer.id,
            name = %row.customer.name,
            rfm = %row.rfm,
            clv = row.clv,
            last_active_days = row.last_active_days,
            "Top customer by CLV"
        );
    }

    // Hold board: what expires soon
    let board = HoldBoard::new(&config.holds);
    for hold in holds {
        board.place(hold);
    }
    board.purge_expired(as_of);
    for hold in board.expiring_within(as_of, config.holds.expiring_soon_minutes) {
        let countdown = HoldCountdown::at(hold.expires_at, as_of);
        info!(
            hold_id = %hold.id,
            customer_id = %hold.customer_id,
            space = %hold.space,
            slot_date = %hold.slot_date,
            remaining = %countdown.display,
            "Hold expiring soon"
        );
    }

    // Draft invoices, GST applied for display
    for draft in &draft_invoices {
        let view = InvoiceView::build(draft, &config.billing);
        info!(
            invoice_id = %view.invoice_id,
            customer_id = %view.customer_id,
            lines = view.lines.len(),
            subtotal = view.subtotal,
            gst = view.gst,
            total = view.total,
            currency = %view.currency,
            "Draft invoice"
        );
    }

    if let Some(path) = &cli.out {
        let payload = serde_json::to_string_pretty(&scored)?;
        tokio::fs::write(path, payload).await?;
        info!(path = %path.display(), customers = scored.len(), "Wrote scored batch");
    }

    info!("VenueDesk run complete");

    Ok(())
}
