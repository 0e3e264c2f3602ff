//! Configuration schema for nimbo.toml.

use crate::agent::MAX_TOOL_ITERATIONS;
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NimboConfig {
    /// Chat model used for every turn.
    pub model: String,

    /// Base URL of the OpenAI-compatible API.
    pub api_base_url: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// System prompt; blank selects the built-in prompt.
    pub system_prompt: String,

    /// Maximum backend round-trips per user turn.
    pub max_tool_iterations: usize,

    /// Maximum tokens per completion.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f64,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for NimboConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".into(),
            api_base_url: "https://api.openai.com".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            system_prompt: String::new(),
            max_tool_iterations: MAX_TOOL_ITERATIONS,
            max_tokens: 4096,
            temperature: 0.7,
            log_level: "warn".into(),
        }
    }
}

impl NimboConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// Returns `None` when the variable is unset or blank.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}
