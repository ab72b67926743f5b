// Configuration loader
// Loads settings from ~/.greenroute/config.toml with environment
// fallback for the capable backend credential.

use anyhow::{bail, Context, Result};
use std::fs;

use super::settings::Config;

/// Load configuration from the GreenRoute config file or environment.
///
/// A missing or unreadable credential is fatal here, at startup, never
/// per query.
pub fn load_config() -> Result<Config> {
    let mut config = match try_load_from_file()? {
        Some(config) => config,
        None => Config::default(),
    };

    // Environment fallback for the hosted API key
    if config.capable.api_key.is_none() {
        if let Ok(key) = std::env::var("HF_API_KEY") {
            if !key.is_empty() {
                config.capable.api_key = Some(key);
            }
        }
    }

    if config.capable.api_key.is_none() {
        bail!(
            "No API key configured for the capable backend.\n\n\
            Either add it to ~/.greenroute/config.toml:\n\n\
            \x1b[36m[capable]\n\
            api_key = \"hf_...\"\x1b[0m\n\n\
            or set the environment variable:\n\
            \x1b[36mexport HF_API_KEY=\"hf_...\"\x1b[0m\n\n\
            Get a free key at: https://huggingface.co/settings/tokens"
        );
    }

    Ok(config)
}

fn try_load_from_file() -> Result<Option<Config>> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let config_path = home.join(".greenroute/config.toml");

    if !config_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    let config: Config = toml::from_str(&contents).context("Failed to parse config.toml")?;

    Ok(Some(config))
}
