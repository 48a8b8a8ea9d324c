//! Translation counters.
//!
//! Counters are thread-local: each applier worker sees its own totals and
//! no lock is ever taken on the translation path.

use crate::obs::sink::{TranslateKind, saturating_u64};
use std::cell::RefCell;

thread_local! {
    static STATE: RefCell<TranslateMetrics> = RefCell::new(TranslateMetrics::default());
}

///
/// TranslateMetrics
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TranslateMetrics {
    pub insert_batches: u64,
    pub update_batches: u64,
    pub delete_batches: u64,
    pub rows: u64,
    pub statements: u64,
    /// Rows keyed on every column because no index was usable.
    pub all_column_fallbacks: u64,
    /// Rows keyed on an index chosen from that row's own values.
    pub row_available_fallbacks: u64,
    pub errors: u64,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub(crate) enum MetricsEvent {
    Batch {
        kind: TranslateKind,
        rows: usize,
        statements: usize,
    },
    AllColumnFallback,
    RowAvailableFallback,
    Error,
}

pub(crate) fn record(event: MetricsEvent) {
    with_state_mut(|m| match event {
        MetricsEvent::Batch {
            kind,
            rows,
            statements,
        } => {
            let batches = match kind {
                TranslateKind::Insert => &mut m.insert_batches,
                TranslateKind::Update => &mut m.update_batches,
                TranslateKind::Delete => &mut m.delete_batches,
            };
            *batches = batches.saturating_add(1);
            m.rows = m.rows.saturating_add(saturating_u64(rows));
            m.statements = m.statements.saturating_add(saturating_u64(statements));
        }
        MetricsEvent::AllColumnFallback => {
            m.all_column_fallbacks = m.all_column_fallbacks.saturating_add(1);
        }
        MetricsEvent::RowAvailableFallback => {
            m.row_available_fallbacks = m.row_available_fallbacks.saturating_add(1);
        }
        MetricsEvent::Error => m.errors = m.errors.saturating_add(1),
    });
}

fn with_state_mut<R>(f: impl FnOnce(&mut TranslateMetrics) -> R) -> R {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

/// Snapshot of this thread's counters.
#[must_use]
pub fn metrics_report() -> TranslateMetrics {
    STATE.with(|state| state.borrow().clone())
}

/// Reset this thread's counters.
pub fn metrics_reset_all() {
    with_state_mut(|m| *m = TranslateMetrics::default());
}
