// Metrics module
// Public interface for the query log and its projections

mod log;
mod types;

pub use log::MetricsLog;
pub use types::{BackendComparison, BackendStats, MetricsSummary, QueryRecord};
