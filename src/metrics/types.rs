// Metrics data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backends::BackendResponse;
use crate::impact::ImpactRecord;
use crate::router::{ModelKind, RoutingDecision};
use crate::scorer::ScoreBreakdown;

/// One fully processed query. Append-only and immutable once built;
/// a record exists only for complete successful pipeline runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
    pub timestamp: DateTime<Utc>,
    pub query: String,
    pub decision: RoutingDecision,
    pub breakdown: ScoreBreakdown,
    pub response: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
    pub latency_ms: u64,
    /// Always exactly 0: both backends are free tier. A visible system
    /// property, not an incidental constant.
    pub cost_usd: f64,
    pub impact: ImpactRecord,
}

impl QueryRecord {
    pub fn new(
        query: String,
        decision: RoutingDecision,
        breakdown: ScoreBreakdown,
        response: BackendResponse,
        impact: ImpactRecord,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            query,
            decision,
            breakdown,
            input_tokens: response.input_tokens,
            output_tokens: response.output_tokens,
            total_tokens: response.total_tokens(),
            latency_ms: response.latency_ms,
            response: response.text,
            cost_usd: 0.0,
            impact,
        }
    }

    pub fn backend(&self) -> ModelKind {
        self.decision.selected
    }
}

/// Lifetime-cumulative statistics over the whole record sequence.
/// Always recomputed on demand, never stored, so it cannot drift.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_queries: usize,
    pub fast_queries: usize,
    pub capable_queries: usize,
    pub fast_percentage: f64,
    pub capable_percentage: f64,
    pub avg_latency_ms: f64,
    pub total_tokens: u64,
    pub avg_tokens_per_query: f64,
    pub total_cost_usd: f64,
    pub total_carbon_emitted_g: f64,
    pub total_water_emitted_ml: f64,
    pub total_carbon_saved_g: f64,
    pub total_water_saved_ml: f64,
}

/// Per-backend slice of the record sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendStats {
    pub count: usize,
    pub avg_latency_ms: f64,
    pub avg_tokens: f64,
}

/// Fast vs capable comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendComparison {
    pub fast: BackendStats,
    pub capable: BackendStats,
    /// Capable average latency minus fast average latency.
    pub capable_slower_by_ms: f64,
}
