//! Loader checkpoint boundary.
//!
//! Checkpoints record, per dump file, how far the loader has applied it.
//! The update statement for a checkpoint is executed in the same
//! transaction as the data it covers, so it is generated here as plain SQL
//! rather than written directly.


use crate::error::InternalError;
use rowsync_config::CheckpointConfig;
use std::collections::BTreeMap;

///
/// FilePosition
///
/// `start` is how far the file has been applied; `end` is its size.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FilePosition {
    pub start: i64,
    pub end: i64,
}

impl FilePosition {
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.start >= self.end
    }
}

///
/// CheckpointStore
///

pub trait CheckpointStore {
    /// Register a file at offset 0.
    fn init(&mut self, file: &str, end_offset: i64) -> Result<(), InternalError>;

    /// Refresh the restoring snapshot from persisted state.
    fn load(&mut self) -> Result<(), InternalError>;

    /// Snapshot taken by the last `load`.
    fn all_restoring_file_info(&self) -> BTreeMap<String, FilePosition>;

    fn count(&self) -> Result<usize, InternalError>;

    fn clear(&mut self) -> Result<(), InternalError>;

    /// Statement advancing `file` to `offset`.
    fn gen_sql(&self, file: &str, offset: i64) -> String;
}

///
/// MemoryCheckpoint
///
/// In-process checkpoint store. `commit` stands in for executing the
/// statement returned by `gen_sql`.
///

#[derive(Clone, Debug)]
pub struct MemoryCheckpoint {
    id: String,
    table: String,
    persisted: BTreeMap<String, FilePosition>,
    restoring: BTreeMap<String, FilePosition>,
}

impl MemoryCheckpoint {
    #[must_use]
    pub fn new(id: impl Into<String>, config: &CheckpointConfig) -> Self {
        Self {
            id: id.into(),
            table: format!("`{}`.`{}_loader_checkpoint`", config.meta_schema, config.task),
            persisted: BTreeMap::new(),
            restoring: BTreeMap::new(),
        }
    }

    /// Fully qualified checkpoint table name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Apply the effect of a `gen_sql` statement.
    pub fn commit(&mut self, file: &str, offset: i64) -> Result<(), InternalError> {
        let position = self
            .persisted
            .get_mut(file)
            .ok_or_else(|| InternalError::checkpoint_not_found(file))?;
        position.start = offset;

        tracing::trace!(id = %self.id, file, offset, "checkpoint committed");

        Ok(())
    }
}

impl CheckpointStore for MemoryCheckpoint {
    fn init(&mut self, file: &str, end_offset: i64) -> Result<(), InternalError> {
        if self.persisted.contains_key(file) {
            return Err(InternalError::checkpoint_conflict(file));
        }

        self.persisted.insert(
            file.to_string(),
            FilePosition {
                start: 0,
                end: end_offset,
            },
        );

        Ok(())
    }

    fn load(&mut self) -> Result<(), InternalError> {
        self.restoring = self.persisted.clone();
        tracing::debug!(id = %self.id, files = self.restoring.len(), "checkpoints loaded");

        Ok(())
    }

    fn all_restoring_file_info(&self) -> BTreeMap<String, FilePosition> {
        self.restoring.clone()
    }

    fn count(&self) -> Result<usize, InternalError> {
        Ok(self.persisted.len())
    }

    fn clear(&mut self) -> Result<(), InternalError> {
        self.persisted.clear();
        self.restoring.clear();

        Ok(())
    }

    fn gen_sql(&self, file: &str, offset: i64) -> String {
        format!(
            "UPDATE {} SET offset={offset} WHERE id='{}' AND filename='{}';",
            self.table,
            escape_literal(&self.id),
            escape_literal(file)
        )
    }
}

fn escape_literal(s: &str) -> String {
    s.replace('\'', "''")
}
