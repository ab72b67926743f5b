// Query pipeline: score, decide, invoke, estimate, record
//
// The single externally callable operation. Scoring, decision and
// impact estimation are cheap pure computations; only the backend call
// is slow, and it runs without holding the metrics lock. A failed
// backend call surfaces to the caller with its kind and backend
// identity; there is no silent fallback to the other tier, and failed
// queries are never recorded.

use std::sync::Arc;

use crate::backends::ModelBackend;
use crate::config::Config;
use crate::errors::RouteError;
use crate::impact::ImpactEstimator;
use crate::metrics::{MetricsLog, QueryRecord};
use crate::router::{ModelKind, RoutingMode, RoutingPolicy};
use crate::scorer::ComplexityScorer;

pub struct Orchestrator {
    scorer: ComplexityScorer,
    policy: RoutingPolicy,
    estimator: ImpactEstimator,
    fast: Arc<dyn ModelBackend>,
    capable: Arc<dyn ModelBackend>,
    metrics: Arc<MetricsLog>,
}

impl Orchestrator {
    /// Assemble the pipeline from configuration plus the two backends.
    pub fn new(
        config: &Config,
        fast: Arc<dyn ModelBackend>,
        capable: Arc<dyn ModelBackend>,
    ) -> Self {
        Self {
            scorer: ComplexityScorer::new(
                &config.routing.complexity_keywords,
                &config.routing.technical_patterns,
            ),
            policy: RoutingPolicy::new(config.routing.complexity_threshold),
            estimator: ImpactEstimator::new(config.emissions.fast, config.emissions.capable),
            fast,
            capable,
            metrics: Arc::new(MetricsLog::new()),
        }
    }

    /// Process one query end to end and return the appended record.
    pub async fn process(
        &self,
        query: &str,
        mode: RoutingMode,
    ) -> Result<QueryRecord, RouteError> {
        let breakdown = self.scorer.score(query);
        let decision = self.policy.decide(breakdown.total, mode);

        let backend = match decision.selected {
            ModelKind::Fast => &self.fast,
            ModelKind::Capable => &self.capable,
        };

        let response = backend.generate(query).await?;
        let impact = self
            .estimator
            .estimate(decision.selected, response.total_tokens());

        tracing::info!(
            backend = %decision.selected,
            score = decision.score,
            latency_ms = response.latency_ms,
            total_tokens = response.total_tokens(),
            carbon_saved_g = impact.carbon_saved_g,
            "Query processed"
        );

        let record = QueryRecord::new(query.to_string(), decision, breakdown, response, impact);
        self.metrics.record(record.clone());
        Ok(record)
    }

    /// The query log; all read-only projections hang off it.
    pub fn metrics(&self) -> &Arc<MetricsLog> {
        &self.metrics
    }
}
