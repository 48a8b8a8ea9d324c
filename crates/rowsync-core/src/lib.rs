//! Core runtime for rowsync: table catalogs, captured values, identity keys,
//! DML generation, and the batch translator that ties them together.
//!
//! Everything here is a pure function of (schema snapshot, row images).
//! No I/O happens in this crate; execution belongs to the applier.
#![warn(unreachable_pub)]

pub mod checkpoint;
pub mod error;
pub mod identity;
pub mod mapping;
pub mod model;
pub mod obs;
pub mod statement;
pub mod translate;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Reserved index name for the table's primary key.
pub const PRIMARY_INDEX: &str = "primary";

/// Separator between column values inside one identity key.
pub const KEY_SEPARATOR: &str = ",";

/// Positional placeholder emitted once per bound value.
pub const PLACEHOLDER: &str = "?";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        mapping::ColumnMapping,
        model::{Column, ColumnCatalog, IndexCatalog, RowImage, TableSchema, UpdatePair},
        statement::GeneratedStatement,
        translate::{TranslatedBatch, Translator},
        value::Value,
    };
}
