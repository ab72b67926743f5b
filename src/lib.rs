// GreenRoute - Carbon-aware model routing proxy
// Library exports

pub mod backends; // Fast/capable model backends behind one trait
pub mod config;
pub mod errors;
pub mod impact; // Carbon/water emission accounting
pub mod metrics;
pub mod orchestrator;
pub mod router;
pub mod scorer; // Heuristic query complexity scoring
pub mod server; // HTTP daemon mode
