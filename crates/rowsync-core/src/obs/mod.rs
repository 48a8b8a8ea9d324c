//! Observability: per-batch trace events and translation counters.
//!
//! Neither tracing nor metrics may change what a translation returns.

pub(crate) mod metrics;
pub(crate) mod sink;


// re-exports
pub use metrics::{TranslateMetrics, metrics_report, metrics_reset_all};
pub use sink::{TranslateKind, TranslateTraceEvent, TranslateTraceSink};
