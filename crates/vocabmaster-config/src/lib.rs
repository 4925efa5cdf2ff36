use std::env;

use serde::{Deserialize, Serialize};

use self::batch::BatchConfig;
use self::enricher::EnricherConfig;
use self::theme::ThemeConfig;

pub mod batch;
pub mod enricher;
pub mod theme;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub enricher: EnricherConfig,
    pub batch: BatchConfig,
    pub theme: ThemeConfig,

    /// Fallback filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    pub fn new() -> Self {
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| default_log_level());

        Config {
            enricher: EnricherConfig::new(),
            batch: BatchConfig::new(),
            theme: ThemeConfig::new(),

            log_level,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enricher: EnricherConfig::default(),
            batch: BatchConfig::default(),
            theme: ThemeConfig::default(),
            log_level: default_log_level(),
        }
    }
}
