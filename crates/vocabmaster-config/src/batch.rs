use std::env;

use serde::{Deserialize, Serialize};

pub const MIN_BATCH_SIZE: usize = 5;
pub const MAX_BATCH_SIZE: usize = 50;
pub const DEFAULT_BATCH_SIZE: usize = 15;

fn default_size() -> usize {
    DEFAULT_BATCH_SIZE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Entries per enrichment call
    #[serde(default = "default_size")]
    pub size: usize,
}

impl BatchConfig {
    pub fn new() -> Self {
        let size = env::var("BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(clamp_batch_size)
            .unwrap_or(DEFAULT_BATCH_SIZE);

        Self { size }
    }

    /// Size as used by the pipeline, forced into the allowed range
    pub fn effective_size(&self) -> usize {
        clamp_batch_size(self.size)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
        }
    }
}

pub fn clamp_batch_size(size: usize) -> usize {
    size.clamp(MIN_BATCH_SIZE, MAX_BATCH_SIZE)
}
