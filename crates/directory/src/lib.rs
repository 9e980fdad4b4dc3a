//! Customer directory support: explicit filter/sort/selection state
//! for the directory table, plus the two data sources that feed it
//! (backend snapshot files and the seeded demo generator).

pub mod demo;
pub mod source;
pub mod view;

pub use demo::DemoGenerator;
pub use source::{AdminSnapshot, SnapshotSource};
pub use view::{DirectoryFilter, DirectoryView, SortColumn, SortDirection};
