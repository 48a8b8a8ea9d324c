//! Batch translation: captured row images in, positional
//! (sql, keys, values) triples out.


use crate::{
    error::{ArityKind, InternalError},
    identity::{all_identity_keys, select_row_available_index, select_schema_fit_index},
    mapping::ColumnMapping,
    model::{IndexColumns, RowImage, TableSchema, UpdatePair},
    obs::{
        metrics::{MetricsEvent, record},
        sink::{TraceScope, TranslateKind, TranslateTraceSink},
    },
    statement::{
        GeneratedStatement, delete_statement, insert_sql, safe_update_statements,
        update_statement,
    },
    value::{Value, cast_row},
};
use rowsync_config::TranslatorConfig;
use std::borrow::Cow;

///
/// TranslatedBatch
///
/// Three sequences aligned by position: `sqls[i]` binds `values[i]` and
/// touches `keys[i]`. Order follows the input rows.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TranslatedBatch {
    pub sqls: Vec<String>,
    pub keys: Vec<Vec<String>>,
    pub values: Vec<Vec<Value>>,
}

impl TranslatedBatch {
    fn with_capacity(n: usize) -> Self {
        Self {
            sqls: Vec::with_capacity(n),
            keys: Vec::with_capacity(n),
            values: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, sql: String, keys: Vec<String>, values: Vec<Value>) {
        self.sqls.push(sql);
        self.keys.push(keys);
        self.values.push(values);
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.sqls.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sqls.is_empty()
    }

    /// Regroup the parallel sequences into one value per statement.
    #[must_use]
    pub fn into_statements(self) -> Vec<GeneratedStatement> {
        self.sqls
            .into_iter()
            .zip(self.keys)
            .zip(self.values)
            .map(|((sql, keys), values)| GeneratedStatement { sql, values, keys })
            .collect()
    }
}

///
/// Translator
///
/// Stateless per-table translator. Holds only shared borrows, so one
/// translator can serve any number of threads.
///

#[derive(Clone, Copy)]
pub struct Translator<'a> {
    table: &'a TableSchema,
    mapping: Option<&'a dyn ColumnMapping>,
    trace: Option<&'a dyn TranslateTraceSink>,
    safe_mode: bool,
    debug: bool,
}

impl<'a> Translator<'a> {
    #[must_use]
    pub const fn new(table: &'a TableSchema) -> Self {
        Self {
            table,
            mapping: None,
            trace: None,
            safe_mode: false,
            debug: false,
        }
    }

    /// Translator honoring `safe-mode` and `debug` from configuration.
    #[must_use]
    pub const fn from_config(table: &'a TableSchema, config: &TranslatorConfig) -> Self {
        Self::new(table)
            .safe_mode(config.safe_mode)
            .debug(config.debug)
    }

    #[must_use]
    pub const fn safe_mode(mut self, safe_mode: bool) -> Self {
        self.safe_mode = safe_mode;
        self
    }

    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn with_mapping(mut self, mapping: &'a dyn ColumnMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    #[must_use]
    pub const fn with_trace(mut self, sink: &'a dyn TranslateTraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    fn debug_log(&self, message: impl AsRef<str>) {
        if self.debug {
            tracing::debug!(
                schema = %self.table.schema,
                table = %self.table.table,
                "{}",
                message.as_ref()
            );
        }
    }

    // ─────────────────────────────────────────────
    // Inserts
    // ─────────────────────────────────────────────

    pub fn translate_inserts(&self, rows: &[RowImage]) -> Result<TranslatedBatch, InternalError> {
        self.run(TranslateKind::Insert, rows.len(), || {
            let mut batch = TranslatedBatch::with_capacity(rows.len());
            let sql = insert_sql(self.table);
            let names = self.mapping_columns();

            for row in rows {
                let row = self.map_row(&names, row)?;
                let values = self.cast_checked(&row, ArityKind::Insert)?;
                let keys = all_identity_keys(&self.table.indexes, &values);

                batch.push(sql.clone(), keys, values);
            }

            Ok(batch)
        })
    }

    // ─────────────────────────────────────────────
    // Updates
    // ─────────────────────────────────────────────

    pub fn translate_updates(
        &self,
        pairs: &[UpdatePair],
    ) -> Result<TranslatedBatch, InternalError> {
        self.run(TranslateKind::Update, pairs.len(), || {
            let capacity = if self.safe_mode { pairs.len() * 2 } else { pairs.len() };
            let mut batch = TranslatedBatch::with_capacity(capacity);
            let schema_fit = select_schema_fit_index(&self.table.indexes);
            let names = self.mapping_columns();

            for pair in pairs {
                let before = self.map_row(&names, &pair.before)?;
                let after = self.map_row(&names, &pair.after)?;
                if before.len() != after.len() {
                    return Err(InternalError::arity_mismatch(
                        ArityKind::UpdatePair,
                        before.len(),
                        after.len(),
                    ));
                }

                let before = self.cast_checked(&before, ArityKind::Update)?;
                let after = self.cast_checked(&after, ArityKind::Update)?;
                let fit = self.fit_index(schema_fit, &before);

                let mut keys = all_identity_keys(&self.table.indexes, &before);
                keys.extend(all_identity_keys(&self.table.indexes, &after));

                if self.safe_mode {
                    for statement in safe_update_statements(self.table, &before, after, fit, &keys)
                    {
                        batch.push(statement.sql, statement.keys, statement.values);
                    }
                    continue;
                }

                match update_statement(self.table, &before, &after, fit) {
                    Some((sql, values)) => batch.push(sql, keys, values),
                    None => self.debug_log("update with empty SET list skipped"),
                }
            }

            Ok(batch)
        })
    }

    // ─────────────────────────────────────────────
    // Deletes
    // ─────────────────────────────────────────────

    pub fn translate_deletes(&self, rows: &[RowImage]) -> Result<TranslatedBatch, InternalError> {
        self.run(TranslateKind::Delete, rows.len(), || {
            let mut batch = TranslatedBatch::with_capacity(rows.len());
            let schema_fit = select_schema_fit_index(&self.table.indexes);
            let names = self.mapping_columns();

            for row in rows {
                let row = self.map_row(&names, row)?;
                let values = self.cast_checked(&row, ArityKind::Delete)?;
                let fit = self.fit_index(schema_fit, &values);
                let keys = all_identity_keys(&self.table.indexes, &values);

                let (sql, where_values) = delete_statement(self.table, &values, fit);
                batch.push(sql, keys, where_values);
            }

            Ok(batch)
        })
    }

    // ─────────────────────────────────────────────
    // Shared steps
    // ─────────────────────────────────────────────

    // Wrap one batch with tracing, metrics, and debug logging.
    fn run(
        &self,
        kind: TranslateKind,
        rows: usize,
        translate: impl FnOnce() -> Result<TranslatedBatch, InternalError>,
    ) -> Result<TranslatedBatch, InternalError> {
        let trace = TraceScope::start(
            self.trace,
            kind,
            &self.table.schema,
            &self.table.table,
            rows,
        );
        self.debug_log(format!(
            "{} batch: rows={rows}, safe_mode={}",
            kind.as_str(),
            self.safe_mode
        ));

        let result = translate();

        match &result {
            Ok(batch) => {
                record(MetricsEvent::Batch {
                    kind,
                    rows,
                    statements: batch.len(),
                });
                if let Some(trace) = trace {
                    trace.finish(batch.len());
                }
                self.debug_log(format!("{} batch: statements={}", kind.as_str(), batch.len()));
            }
            Err(err) => {
                record(MetricsEvent::Error);
                if let Some(trace) = trace {
                    trace.error(err);
                }
                tracing::debug!(
                    schema = %self.table.schema,
                    table = %self.table.table,
                    kind = kind.as_str(),
                    error = %err.display_with_class(),
                    "batch translation failed"
                );
            }
        }

        result
    }

    // Column names handed to the mapping, built once per batch.
    // Empty when no mapping is installed.
    fn mapping_columns(&self) -> Vec<String> {
        if self.mapping.is_some() {
            self.table.columns.names()
        } else {
            Vec::new()
        }
    }

    // Apply the optional column mapping. Borrowed when there is none.
    fn map_row<'r>(
        &self,
        columns: &[String],
        row: &'r [Value],
    ) -> Result<Cow<'r, [Value]>, InternalError> {
        let Some(mapping) = self.mapping else {
            return Ok(Cow::Borrowed(row));
        };

        let mapped = mapping
            .map_row(&self.table.schema, &self.table.table, columns, row)
            .map_err(InternalError::mapping)?;

        Ok(Cow::Owned(mapped.values))
    }

    // Arity check against the catalog, then unsigned-aware cast.
    fn cast_checked(&self, row: &[Value], kind: ArityKind) -> Result<Vec<Value>, InternalError> {
        let expected = self.table.columns.len();
        if row.len() != expected {
            return Err(InternalError::arity_mismatch(kind, expected, row.len()));
        }

        Ok(cast_row(&self.table.columns, row))
    }

    // Schema-fit index when there is one, else whatever this row can key on.
    fn fit_index(
        &self,
        schema_fit: Option<&'a IndexColumns>,
        row: &[Value],
    ) -> Option<&'a IndexColumns> {
        if schema_fit.is_some() {
            return schema_fit;
        }

        let available = select_row_available_index(&self.table.indexes, row);
        match available {
            Some(_) => record(MetricsEvent::RowAvailableFallback),
            None => record(MetricsEvent::AllColumnFallback),
        }

        available
    }
}
