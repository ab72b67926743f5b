// Model backend abstraction
//
// Both model tiers are opaque HTTP services behind one capability
// trait; selection logic never inspects a concrete type. Token counts
// are backend-reported where available, otherwise estimated with the
// same whitespace proxy on both tiers so emission comparisons stay
// apples-to-apples.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod capable;
mod fast;

pub use capable::CapableBackend;
pub use fast::FastBackend;

use crate::errors::RouteError;
use crate::router::ModelKind;

/// Response from one backend invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendResponse {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub latency_ms: u64,
}

impl BackendResponse {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Capability interface implemented by both model tiers.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Generate a response for a query.
    ///
    /// Fails with `BackendUnavailable` or `BackendTimeout`; the caller
    /// must not silently reroute to the other tier.
    async fn generate(&self, query: &str) -> Result<BackendResponse, RouteError>;

    /// Which tier this backend is.
    fn kind(&self) -> ModelKind;

    /// Model identifier for logging.
    fn model_name(&self) -> &str;
}

/// Whitespace-tokenization proxy for backends that do not report
/// token counts. Must stay identical across tiers.
pub(crate) fn estimate_tokens(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens_whitespace_proxy() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("one two three"), 3);
        assert_eq!(estimate_tokens("  spaced   out  "), 2);
    }

    #[test]
    fn test_total_tokens_sums_both_directions() {
        let response = BackendResponse {
            text: "hi".to_string(),
            input_tokens: 12,
            output_tokens: 40,
            latency_ms: 100,
        };
        assert_eq!(response.total_tokens(), 52);
    }
}
