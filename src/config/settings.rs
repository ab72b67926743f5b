// Configuration structs
//
// Everything the routing core consumes is overridable from
// ~/.greenroute/config.toml without code changes: threshold, keyword
// and pattern sets, emission factors, backend endpoints and timeouts.

use serde::Deserialize;

use crate::impact::EmissionFactors;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub routing: RoutingConfig,
    pub emissions: EmissionsConfig,
    pub fast: FastBackendConfig,
    pub capable: CapableBackendConfig,
    pub server: ServerConfig,
}

/// Complexity scoring and threshold settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Scores below this route to the fast model; at or above, capable.
    pub complexity_threshold: u32,

    /// Keywords worth 5 points each when present in a query.
    pub complexity_keywords: Vec<String>,

    /// Technical patterns worth 3 points each when present.
    pub technical_patterns: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            complexity_threshold: 12,
            complexity_keywords: vec![
                "explain".to_string(),
                "design".to_string(),
                "analyze".to_string(),
            ],
            technical_patterns: vec![
                "function".to_string(),
                "api".to_string(),
                "algorithm".to_string(),
            ],
        }
    }
}

/// Per-backend emission factors, per 1000 total tokens.
#[derive(Debug, Clone)]
pub struct EmissionsConfig {
    pub fast: EmissionFactors,
    pub capable: EmissionFactors,
}

/// Partial factor override; unset fields keep the tier's seed value.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct FactorOverride {
    carbon_g_per_1k_tokens: Option<f64>,
    water_ml_per_1k_tokens: Option<f64>,
}

impl FactorOverride {
    fn apply(self, seed: EmissionFactors) -> EmissionFactors {
        EmissionFactors {
            carbon_g_per_1k_tokens: self
                .carbon_g_per_1k_tokens
                .unwrap_or(seed.carbon_g_per_1k_tokens),
            water_ml_per_1k_tokens: self
                .water_ml_per_1k_tokens
                .unwrap_or(seed.water_ml_per_1k_tokens),
        }
    }
}

// The seed values differ per tier, so a field-level serde default on
// EmissionFactors cannot express a partial override; merge here
// instead.
impl<'de> serde::Deserialize<'de> for EmissionsConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Default, Deserialize)]
        #[serde(default)]
        struct Raw {
            fast: FactorOverride,
            capable: FactorOverride,
        }

        let raw = Raw::deserialize(deserializer)?;
        let seed = EmissionsConfig::default();
        Ok(Self {
            fast: raw.fast.apply(seed.fast),
            capable: raw.capable.apply(seed.capable),
        })
    }
}

impl Default for EmissionsConfig {
    fn default() -> Self {
        Self {
            fast: EmissionFactors {
                carbon_g_per_1k_tokens: 0.005,
                water_ml_per_1k_tokens: 0.08,
            },
            capable: EmissionFactors {
                carbon_g_per_1k_tokens: 0.15,
                water_ml_per_1k_tokens: 2.5,
            },
        }
    }
}

/// Fast backend: a local model server with an Ollama-style generate
/// endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FastBackendConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for FastBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:11434".to_string(),
            model: "tinyllama".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Capable backend: a hosted inference API reached with a bearer key.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CapableBackendConfig {
    pub api_url: String,

    /// Falls back to the HF_API_KEY environment variable when unset.
    pub api_key: Option<String>,

    pub max_tokens: u32,

    /// The hosted model is materially slower than the local one.
    pub timeout_secs: u64,
}

impl Default for CapableBackendConfig {
    fn default() -> Self {
        Self {
            api_url:
                "https://api-inference.huggingface.co/models/mistralai/Mixtral-8x7B-Instruct-v0.1"
                    .to_string(),
            api_key: None,
            max_tokens: 500,
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
        }
    }
}
