//! Per-table schema snapshots.
//!
//! A snapshot is captured once per table version and shared read-only by
//! every translation against that table. Nothing in here is mutable after
//! construction, so snapshots can be handed to any number of workers.

mod column;
mod index;
mod table;


// re-exports
pub use column::{Column, ColumnCatalog};
pub use index::{IndexCatalog, IndexColumns};
pub use table::{RowImage, TableSchema, UpdatePair};
