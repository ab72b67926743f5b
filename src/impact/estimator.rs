// Carbon and water impact estimation
//
// Emissions scale linearly with total tokens (input + output) against
// per-1000-token factors. Savings are the counterfactual: what the
// same token volume would have emitted on the capable backend, minus
// what the fast backend actually emitted. No savings are claimed when
// the capable backend served the query.

use serde::{Deserialize, Serialize};

use crate::router::ModelKind;

/// Per-1000-total-token emission factors for one backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactors {
    pub carbon_g_per_1k_tokens: f64,
    pub water_ml_per_1k_tokens: f64,
}

impl EmissionFactors {
    fn carbon_for(&self, total_tokens: u32) -> f64 {
        self.carbon_g_per_1k_tokens * f64::from(total_tokens) / 1000.0
    }

    fn water_for(&self, total_tokens: u32) -> f64 {
        self.water_ml_per_1k_tokens * f64::from(total_tokens) / 1000.0
    }
}

/// Derived emission and savings figures for one query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactRecord {
    pub carbon_emitted_g: f64,
    pub water_emitted_ml: f64,
    pub carbon_saved_g: f64,
    pub water_saved_ml: f64,
}

/// Converts token counts plus the backend actually used into an
/// [`ImpactRecord`].
#[derive(Debug, Clone)]
pub struct ImpactEstimator {
    fast: EmissionFactors,
    capable: EmissionFactors,
}

impl ImpactEstimator {
    pub fn new(fast: EmissionFactors, capable: EmissionFactors) -> Self {
        Self { fast, capable }
    }

    fn factors(&self, backend: ModelKind) -> &EmissionFactors {
        match backend {
            ModelKind::Fast => &self.fast,
            ModelKind::Capable => &self.capable,
        }
    }

    /// Estimate impact for a query served by `backend` with
    /// `total_tokens` input + output tokens.
    pub fn estimate(&self, backend: ModelKind, total_tokens: u32) -> ImpactRecord {
        let factors = self.factors(backend);
        let carbon_emitted_g = factors.carbon_for(total_tokens);
        let water_emitted_ml = factors.water_for(total_tokens);

        let (carbon_saved_g, water_saved_ml) = match backend {
            ModelKind::Fast => (
                self.capable.carbon_for(total_tokens) - carbon_emitted_g,
                self.capable.water_for(total_tokens) - water_emitted_ml,
            ),
            ModelKind::Capable => (0.0, 0.0),
        };

        ImpactRecord {
            carbon_emitted_g,
            water_emitted_ml,
            carbon_saved_g,
            water_saved_ml,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> ImpactEstimator {
        ImpactEstimator::new(
            EmissionFactors {
                carbon_g_per_1k_tokens: 0.005,
                water_ml_per_1k_tokens: 0.08,
            },
            EmissionFactors {
                carbon_g_per_1k_tokens: 0.15,
                water_ml_per_1k_tokens: 2.5,
            },
        )
    }

    #[test]
    fn test_capable_claims_no_savings() {
        let impact = estimator().estimate(ModelKind::Capable, 1000);
        assert_eq!(impact.carbon_emitted_g, 0.15);
        assert_eq!(impact.water_emitted_ml, 2.5);
        assert_eq!(impact.carbon_saved_g, 0.0);
        assert_eq!(impact.water_saved_ml, 0.0);
    }

    #[test]
    fn test_fast_savings_are_counterfactual_difference() {
        let est = estimator();
        let tokens = 1000;
        let fast = est.estimate(ModelKind::Fast, tokens);
        let capable = est.estimate(ModelKind::Capable, tokens);

        assert!((fast.carbon_saved_g - (capable.carbon_emitted_g - fast.carbon_emitted_g)).abs() < 1e-12);
        assert!((fast.water_saved_ml - (capable.water_emitted_ml - fast.water_emitted_ml)).abs() < 1e-12);
    }

    #[test]
    fn test_reference_point_simple_query() {
        // ~58 total tokens on the fast backend should save roughly
        // 0.0084 g CO2 and 0.14 ml water with the seed factors.
        let impact = estimator().estimate(ModelKind::Fast, 58);
        assert!((impact.carbon_saved_g - 0.0084).abs() < 0.0005);
        assert!((impact.water_saved_ml - 0.14).abs() < 0.005);
    }

    #[test]
    fn test_zero_tokens_zero_impact() {
        let impact = estimator().estimate(ModelKind::Fast, 0);
        assert_eq!(impact.carbon_emitted_g, 0.0);
        assert_eq!(impact.water_emitted_ml, 0.0);
        assert_eq!(impact.carbon_saved_g, 0.0);
        assert_eq!(impact.water_saved_ml, 0.0);
    }
}
