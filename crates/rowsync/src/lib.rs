//! ## Crate layout
//! - `config`: TOML-backed translator, checkpoint, and column-mapping settings.
//! - `core`: table model, value casting, identity keys, statement building,
//!   batch translation, column mapping, checkpoints, and observability.
//! - `error`: public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` module mirrors the surface a replication worker needs to
//! turn captured row events into statements.

pub use rowsync_config as config;
pub use rowsync_core as core;

pub mod error;

pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Worker Prelude
///

pub mod prelude {
    pub use crate::{
        config::TranslatorConfig,
        core::{
            checkpoint::{CheckpointStore, FilePosition, MemoryCheckpoint},
            mapping::{NoopMapping, RuleMapping},
            prelude::*,
        },
        error::{Error, ErrorKind, ErrorOrigin},
    };
}
