// Router module
// Public interface for routing decisions

mod decision;

pub use decision::{ModelKind, RoutingDecision, RoutingMode, RoutingPolicy};
