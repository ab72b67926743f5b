// Impact module
// Public interface for emission and savings estimation

mod estimator;

pub use estimator::{EmissionFactors, ImpactEstimator, ImpactRecord};
