use std::env;

use serde::{Deserialize, Serialize};

fn default_program() -> String {
    "claude".to_string()
}

fn default_args() -> Vec<String> {
    vec!["--no-input".to_string(), "-p".to_string()]
}

fn default_timeout_seconds() -> u64 {
    120
}

/// External enrichment command. The prompt is appended after `args`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnricherConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl EnricherConfig {
    pub fn new() -> Self {
        let program = env::var("ENRICHER_PROGRAM").unwrap_or_else(|_| default_program());

        let args = env::var("ENRICHER_ARGS")
            .map(|v| v.split_whitespace().map(str::to_string).collect())
            .unwrap_or_else(|_| default_args());

        let timeout_seconds = env::var("ENRICHER_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_timeout_seconds);

        Self {
            program,
            args,
            timeout_seconds,
        }
    }
}

impl Default for EnricherConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
