// Routing decision logic

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which model tier serves a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Low-latency, locally hosted model.
    Fast,
    /// Higher-latency, remotely hosted model with stronger reasoning.
    Capable,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Fast => "fast",
            ModelKind::Capable => "capable",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied routing instruction. Never inferred from the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingMode {
    #[default]
    Auto,
    ForceFast,
    ForceCapable,
}

/// Outcome of applying the routing policy to one query.
///
/// Created once per query and consumed unchanged by impact accounting
/// and the metrics log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub selected: ModelKind,
    pub reason: String,
    pub score: u32,
    pub was_overridden: bool,
}

/// Two-tier selection policy: user override wins, otherwise the
/// complexity score is compared against the threshold.
#[derive(Debug, Clone)]
pub struct RoutingPolicy {
    threshold: u32,
}

impl RoutingPolicy {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Decide which backend serves a query.
    ///
    /// Automatic mode selects Fast on strict `score < threshold`; a
    /// score equal to the threshold routes Capable. There is no retry
    /// or fallback here; backend failures surface to the orchestrator's
    /// caller untouched.
    pub fn decide(&self, score: u32, mode: RoutingMode) -> RoutingDecision {
        match mode {
            RoutingMode::ForceFast => {
                tracing::info!(score, "Routing decision: FAST (user override)");
                RoutingDecision {
                    selected: ModelKind::Fast,
                    reason: "user override: forced fast model".to_string(),
                    score,
                    was_overridden: true,
                }
            }
            RoutingMode::ForceCapable => {
                tracing::info!(score, "Routing decision: CAPABLE (user override)");
                RoutingDecision {
                    selected: ModelKind::Capable,
                    reason: "user override: forced capable model".to_string(),
                    score,
                    was_overridden: true,
                }
            }
            RoutingMode::Auto => {
                if score < self.threshold {
                    tracing::info!(score, threshold = self.threshold, "Routing decision: FAST");
                    RoutingDecision {
                        selected: ModelKind::Fast,
                        reason: format!(
                            "simple query (score {} < threshold {})",
                            score, self.threshold
                        ),
                        score,
                        was_overridden: false,
                    }
                } else {
                    tracing::info!(score, threshold = self.threshold, "Routing decision: CAPABLE");
                    RoutingDecision {
                        selected: ModelKind::Capable,
                        reason: format!(
                            "complex query (score {} >= threshold {})",
                            score, self.threshold
                        ),
                        score,
                        was_overridden: false,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_routes_fast_below_threshold() {
        let policy = RoutingPolicy::new(12);
        for score in 0..12 {
            let decision = policy.decide(score, RoutingMode::Auto);
            assert_eq!(decision.selected, ModelKind::Fast);
            assert!(!decision.was_overridden);
            assert!(decision.reason.contains("simple"));
            assert!(decision.reason.contains(&score.to_string()));
        }
    }

    #[test]
    fn test_auto_routes_capable_at_and_above_threshold() {
        let policy = RoutingPolicy::new(12);
        for score in [12, 13, 25, 100] {
            let decision = policy.decide(score, RoutingMode::Auto);
            assert_eq!(decision.selected, ModelKind::Capable);
            assert!(!decision.was_overridden);
            assert!(decision.reason.contains("complex"));
        }
    }

    #[test]
    fn test_threshold_boundary_is_strict() {
        // Exactly at the threshold routes Capable
        let policy = RoutingPolicy::new(12);
        assert_eq!(
            policy.decide(11, RoutingMode::Auto).selected,
            ModelKind::Fast
        );
        assert_eq!(
            policy.decide(12, RoutingMode::Auto).selected,
            ModelKind::Capable
        );
    }

    #[test]
    fn test_force_fast_ignores_score() {
        let policy = RoutingPolicy::new(12);
        let decision = policy.decide(100, RoutingMode::ForceFast);
        assert_eq!(decision.selected, ModelKind::Fast);
        assert!(decision.was_overridden);
        assert!(decision.reason.contains("override"));
    }

    #[test]
    fn test_force_capable_ignores_score() {
        let policy = RoutingPolicy::new(12);
        let decision = policy.decide(0, RoutingMode::ForceCapable);
        assert_eq!(decision.selected, ModelKind::Capable);
        assert!(decision.was_overridden);
        assert!(decision.reason.contains("override"));
    }

    #[test]
    fn test_custom_threshold() {
        let policy = RoutingPolicy::new(5);
        assert_eq!(
            policy.decide(4, RoutingMode::Auto).selected,
            ModelKind::Fast
        );
        assert_eq!(
            policy.decide(5, RoutingMode::Auto).selected,
            ModelKind::Capable
        );
    }

    #[test]
    fn test_mode_deserializes_from_snake_case() {
        let mode: RoutingMode = serde_json::from_str("\"force_fast\"").unwrap();
        assert_eq!(mode, RoutingMode::ForceFast);
        let mode: RoutingMode = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(mode, RoutingMode::Auto);
    }
}
