use std::env;

use serde::{Deserialize, Serialize};

fn default_assets_dir() -> String {
    "themes".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Root holding one `<theme id>/` directory of static assets per theme
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

impl ThemeConfig {
    pub fn new() -> Self {
        let assets_dir = env::var("THEME_ASSETS_DIR").unwrap_or_else(|_| default_assets_dir());

        Self { assets_dir }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
        }
    }
}
