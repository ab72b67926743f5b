// Complexity scorer module
// Public interface for query complexity scoring

mod complexity;

pub use complexity::{ComplexityScorer, ScoreBreakdown};
