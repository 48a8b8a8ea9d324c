//! Batch tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect
//! translation semantics.

use crate::error::{ErrorClass, ErrorOrigin, InternalError};

///
/// TranslateTraceSink
///

pub trait TranslateTraceSink: Send + Sync {
    fn on_event(&self, event: TranslateTraceEvent<'_>);
}

///
/// TranslateKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TranslateKind {
    Insert,
    Update,
    Delete,
}

impl TranslateKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

///
/// TranslateTraceEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TranslateTraceEvent<'a> {
    Start {
        kind: TranslateKind,
        schema: &'a str,
        table: &'a str,
        rows: u64,
    },
    Finish {
        kind: TranslateKind,
        schema: &'a str,
        table: &'a str,
        statements: u64,
    },
    Error {
        kind: TranslateKind,
        schema: &'a str,
        table: &'a str,
        class: ErrorClass,
        origin: ErrorOrigin,
    },
}

///
/// TraceScope
///

pub(crate) struct TraceScope<'a> {
    sink: &'a dyn TranslateTraceSink,
    kind: TranslateKind,
    schema: &'a str,
    table: &'a str,
}

impl<'a> TraceScope<'a> {
    pub(crate) fn start(
        sink: Option<&'a dyn TranslateTraceSink>,
        kind: TranslateKind,
        schema: &'a str,
        table: &'a str,
        rows: usize,
    ) -> Option<Self> {
        let sink = sink?;
        sink.on_event(TranslateTraceEvent::Start {
            kind,
            schema,
            table,
            rows: saturating_u64(rows),
        });

        Some(Self {
            sink,
            kind,
            schema,
            table,
        })
    }

    pub(crate) fn finish(self, statements: usize) {
        self.sink.on_event(TranslateTraceEvent::Finish {
            kind: self.kind,
            schema: self.schema,
            table: self.table,
            statements: saturating_u64(statements),
        });
    }

    pub(crate) fn error(self, err: &InternalError) {
        self.sink.on_event(TranslateTraceEvent::Error {
            kind: self.kind,
            schema: self.schema,
            table: self.table,
            class: err.class,
            origin: err.origin,
        });
    }
}

pub(crate) fn saturating_u64(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}
