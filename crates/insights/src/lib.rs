//! Customer lifetime analytics for the venue booking console — the
//! RFM/CLV scoring transform and the directory's summary counters.

pub mod scoring;
pub mod summary;

pub use scoring::CustomerScorer;
pub use summary::{batch_overview, BatchOverview};
