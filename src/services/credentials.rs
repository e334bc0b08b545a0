use anyhow::{bail, Result};

use crate::config::API_KEY_ENV;

/// Resolve the Gemini API key from the environment. There is no embedded
/// fallback: a missing or empty variable is a startup error with an
/// actionable message.
pub fn resolve_api_key() -> Result<String> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => bail!(
            "no API key found: set the {} environment variable to your Gemini API key",
            API_KEY_ENV
        ),
    }
}
