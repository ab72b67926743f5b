// Append-only in-memory query log and its projections
//
// The log is the only shared mutable state in the system. Appends and
// projections take a short mutex; backend calls never run under it.
// Records live for the process lifetime, no durability across
// restarts.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};

use super::types::{BackendComparison, BackendStats, MetricsSummary, QueryRecord};
use crate::router::ModelKind;

#[derive(Debug, Default)]
pub struct MetricsLog {
    records: Mutex<Vec<QueryRecord>>,
}

impl MetricsLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one completed query. Append order follows completion
    /// order, not submission order.
    pub fn record(&self, record: QueryRecord) {
        let mut records = self.records.lock().expect("metrics lock poisoned");
        records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("metrics lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recompute the lifetime summary from the full record sequence.
    /// Zero records produce an all-zero summary, not a division error.
    pub fn summary(&self) -> MetricsSummary {
        let records = self.records.lock().expect("metrics lock poisoned");
        Self::summary_of(&records)
    }

    fn summary_of(records: &[QueryRecord]) -> MetricsSummary {
        if records.is_empty() {
            return MetricsSummary::default();
        }

        let total = records.len();
        let fast = records
            .iter()
            .filter(|r| r.backend() == ModelKind::Fast)
            .count();
        let capable = total - fast;
        let total_latency: u64 = records.iter().map(|r| r.latency_ms).sum();
        let total_tokens: u64 = records.iter().map(|r| u64::from(r.total_tokens)).sum();

        MetricsSummary {
            total_queries: total,
            fast_queries: fast,
            capable_queries: capable,
            fast_percentage: fast as f64 / total as f64 * 100.0,
            capable_percentage: capable as f64 / total as f64 * 100.0,
            avg_latency_ms: total_latency as f64 / total as f64,
            total_tokens,
            avg_tokens_per_query: total_tokens as f64 / total as f64,
            total_cost_usd: records.iter().map(|r| r.cost_usd).sum(),
            total_carbon_emitted_g: records.iter().map(|r| r.impact.carbon_emitted_g).sum(),
            total_water_emitted_ml: records.iter().map(|r| r.impact.water_emitted_ml).sum(),
            total_carbon_saved_g: records.iter().map(|r| r.impact.carbon_saved_g).sum(),
            total_water_saved_ml: records.iter().map(|r| r.impact.water_saved_ml).sum(),
        }
    }

    /// Compare the two tiers over all records so far.
    pub fn comparison(&self) -> BackendComparison {
        let records = self.records.lock().expect("metrics lock poisoned");
        Self::comparison_of(&records)
    }

    fn comparison_of(records: &[QueryRecord]) -> BackendComparison {
        let fast = Self::stats_for(records, ModelKind::Fast);
        let capable = Self::stats_for(records, ModelKind::Capable);
        let capable_slower_by_ms = capable.avg_latency_ms - fast.avg_latency_ms;

        BackendComparison {
            fast,
            capable,
            capable_slower_by_ms,
        }
    }

    /// Most recent records, newest last.
    pub fn recent(&self, limit: usize) -> Vec<QueryRecord> {
        let records = self.records.lock().expect("metrics lock poisoned");
        let skip = records.len().saturating_sub(limit);
        records[skip..].to_vec()
    }

    /// Export records plus the current summary as pretty JSON.
    ///
    /// Records, summary and comparison all come from one snapshot so
    /// the export agrees with itself even while appends continue.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let snapshot = {
            let records = self.records.lock().expect("metrics lock poisoned");
            records.clone()
        };
        let payload = serde_json::json!({
            "records": snapshot,
            "summary": Self::summary_of(&snapshot),
            "comparison": Self::comparison_of(&snapshot),
        });

        let file = std::fs::File::create(path.as_ref())
            .with_context(|| format!("Failed to create {}", path.as_ref().display()))?;
        serde_json::to_writer_pretty(file, &payload).context("Failed to write metrics export")?;
        Ok(())
    }

    fn stats_for(records: &[QueryRecord], kind: ModelKind) -> BackendStats {
        let subset: Vec<&QueryRecord> = records.iter().filter(|r| r.backend() == kind).collect();
        if subset.is_empty() {
            return BackendStats::default();
        }

        let count = subset.len();
        let total_latency: u64 = subset.iter().map(|r| r.latency_ms).sum();
        let total_tokens: u64 = subset.iter().map(|r| u64::from(r.total_tokens)).sum();

        BackendStats {
            count,
            avg_latency_ms: total_latency as f64 / count as f64,
            avg_tokens: total_tokens as f64 / count as f64,
        }
    }
}
