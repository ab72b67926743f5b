// Routing error taxonomy
//
// Scorer and policy are total functions and never produce these; errors
// come from missing input, backend calls, or startup configuration.

use thiserror::Error;

use crate::router::ModelKind;

#[derive(Debug, Error)]
pub enum RouteError {
    /// Request carried no query at all. An empty string is not invalid
    /// input: it scores 0 and routes normally.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Backend could not be reached or returned a failure response.
    #[error("{backend} backend unavailable: {message}")]
    BackendUnavailable { backend: ModelKind, message: String },

    /// Backend did not answer within the configured deadline.
    #[error("{backend} backend timed out after {timeout_secs}s")]
    BackendTimeout { backend: ModelKind, timeout_secs: u64 },

    /// Fatal at startup, never raised per query.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl RouteError {
    /// Which backend failed, if this is a backend error.
    pub fn backend(&self) -> Option<ModelKind> {
        match self {
            RouteError::BackendUnavailable { backend, .. } => Some(*backend),
            RouteError::BackendTimeout { backend, .. } => Some(*backend),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_errors_carry_identity() {
        let err = RouteError::BackendTimeout {
            backend: ModelKind::Capable,
            timeout_secs: 120,
        };
        assert_eq!(err.backend(), Some(ModelKind::Capable));
        assert!(err.to_string().contains("capable"));

        let err = RouteError::InvalidInput("missing query".to_string());
        assert_eq!(err.backend(), None);
    }
}
