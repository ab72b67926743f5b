// Orchestrator module
// Public interface for the query pipeline

mod pipeline;

pub use pipeline::Orchestrator;
